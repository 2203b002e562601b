pub mod batch;
pub mod parfile;
pub mod serialization;
pub mod target;
