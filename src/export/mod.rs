//! Database export over HTTP(S).
//!
//! This module retrieves a full database dump from the server's `/export`
//! endpoint and streams it into a local file.
//!
//! # Features
//!
//! - Basic credentials embedded in the endpoint URL
//! - Streaming copy with a fixed-size buffer (memory does not grow with the dump)
//! - One typed error per failing step, no retries
//! - Optional live progress counters
//!
//! # Example
//!
//! ```no_run
//! use dbexport_core::export::{ConnectionParams, ExportClient};
//! use std::path::Path;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let params = ConnectionParams::new("http", "localhost", "8000", "root:root");
//! let client = ExportClient::new()?;
//! let summary = client.export(&params, Path::new("backup.db")).await?;
//! println!("Exported {} bytes", summary.bytes_written);
//! # Ok(())
//! # }
//! ```

mod client;
pub mod constants;
mod destination;
mod error;
mod params;
mod stream;

pub use client::{ExportClient, ExportSummary, export};
pub use destination::{open_destination, resolve_destination};
pub use error::{ExportError, ExportErrorKind};
pub use params::{ConnectionParams, Scheme};
pub use stream::{CopyError, ExportProgress, stream_to_writer};

// Note: we do NOT define a module-local Result alias.
// Use `Result<T, ExportError>` explicitly in function signatures.
