//! Shared contig-filter domain primitives.
//!
//! This crate owns request validation, the contig filter itself, and the
//! workspace wire contracts. It intentionally excludes HTTP and Lambda runtime
//! concerns; those live in `contig_filter_lambda`.

pub mod contract;
pub mod filter;
pub mod refs;
pub mod workspace;
