//! ADA audit host: scan file loading and the parallel batch runner

pub mod runner;
pub mod scan_file;
