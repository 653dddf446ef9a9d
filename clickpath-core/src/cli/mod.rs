//! Command-line surface shared by the `clickpath` binary.

pub mod conf;
pub mod report;
