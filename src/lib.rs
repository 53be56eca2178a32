//! Export Core Library
//!
//! This library implements the export transfer protocol of the `dbexport`
//! tool: an authenticated GET against a database server's `/export`
//! endpoint whose body is streamed into a local file.
//!
//! # Architecture
//!
//! - [`export`] - connection parameters, request construction, response
//!   validation and the streaming copy

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod export;
mod user_agent;

#[cfg(test)]
pub(crate) mod test_support;

// Re-export commonly used types
pub use export::{
    ConnectionParams, ExportClient, ExportError, ExportErrorKind, ExportProgress, ExportSummary,
    Scheme, resolve_destination,
};
