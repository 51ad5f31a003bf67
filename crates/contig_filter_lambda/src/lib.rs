//! Runtime adapters and handlers for the contig filter service.
//!
//! This crate owns runtime integration details (Lambda handlers, the workspace
//! JSON-RPC client, configuration) and exposes a single runtime module boundary
//! for the contract, filter, reference, and workspace primitives.

pub mod adapters;
pub mod config;
pub mod error;
pub mod handlers;
pub mod logging;
pub mod runtime;
pub mod service;
