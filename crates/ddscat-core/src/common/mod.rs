pub mod polarization;
pub mod ranges;
