//! Reader/writer for the DDSCAT `ddscat.par` parameter format and a
//! generator for SGE batch-submission scripts.

pub mod common;
pub mod domain;
pub mod modules;
