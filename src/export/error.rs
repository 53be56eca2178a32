//! Error types for the export module.
//!
//! Every failure of an export maps to exactly one [`ExportErrorKind`]. The
//! `Display` output carries the technical detail for logs, while
//! [`ExportError::user_message`] gives the short text shown to the user.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

/// Failure category of an export, in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportErrorKind {
    /// Missing or extra destination path argument.
    Usage,
    /// The destination file could not be opened or created.
    Destination,
    /// Unsupported connection configuration (scheme).
    Configuration,
    /// Request construction or network-level failure.
    Connection,
    /// The server rejected the credentials (HTTP 401).
    Authentication,
    /// The server answered with any other non-200 status.
    Server,
    /// Copying the response body into the destination failed.
    Transfer,
}

impl ExportErrorKind {
    /// Returns the stable label used in log fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Usage => "usage",
            Self::Destination => "destination",
            Self::Configuration => "configuration",
            Self::Connection => "connection",
            Self::Authentication => "authentication",
            Self::Server => "server",
            Self::Transfer => "transfer",
        }
    }
}

impl fmt::Display for ExportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur during an export.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Zero or more than one destination path was supplied.
    #[error("expected exactly one destination path, got {count}")]
    Usage {
        /// Number of paths supplied.
        count: usize,
    },

    /// The destination file could not be opened for writing.
    #[error("cannot open destination {path}: {source}")]
    Destination {
        /// The destination path.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configured scheme is neither `http` nor `https`.
    #[error("unsupported scheme '{scheme}', expected 'http' or 'https'")]
    Configuration {
        /// The rejected scheme value.
        scheme: String,
    },

    /// The request could not be built or sent.
    #[error("connection to {endpoint} failed: {reason}")]
    Connection {
        /// Endpoint with credentials redacted.
        endpoint: String,
        /// What went wrong.
        reason: String,
        /// The underlying HTTP client error, when there is one.
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The server returned 401.
    #[error("authentication rejected by {endpoint} (HTTP 401)")]
    Authentication {
        /// Endpoint with credentials redacted.
        endpoint: String,
    },

    /// The server returned a non-200, non-401 status.
    #[error("HTTP {status} from {endpoint}: {body}")]
    Server {
        /// Endpoint with credentials redacted.
        endpoint: String,
        /// The HTTP status code.
        status: u16,
        /// The full response body, decoded lossily as text.
        body: String,
    },

    /// The body copy failed after the response was accepted.
    #[error("transfer into {path} failed after {bytes_written} bytes: {source}")]
    Transfer {
        /// The destination path.
        path: PathBuf,
        /// Bytes successfully handed to the file before the failure.
        bytes_written: u64,
        /// Read (network) or write (disk) failure.
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Creates a usage error for the given number of path arguments.
    pub fn usage(count: usize) -> Self {
        Self::Usage { count }
    }

    /// Creates a destination error.
    pub fn destination(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Destination {
            path: path.into(),
            source,
        }
    }

    /// Creates a configuration error for an unsupported scheme.
    pub fn configuration(scheme: impl Into<String>) -> Self {
        Self::Configuration {
            scheme: scheme.into(),
        }
    }

    /// Creates a connection error without an HTTP client source.
    pub fn connection(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            reason: reason.into(),
            source: None,
        }
    }

    /// Creates a connection error from an HTTP client failure.
    pub fn network(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Connection {
            endpoint: endpoint.into(),
            reason: source.to_string(),
            source: Some(source),
        }
    }

    /// Creates an authentication error.
    pub fn authentication(endpoint: impl Into<String>) -> Self {
        Self::Authentication {
            endpoint: endpoint.into(),
        }
    }

    /// Creates a server error carrying the diagnostic body.
    pub fn server(endpoint: impl Into<String>, status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            endpoint: endpoint.into(),
            status,
            body: body.into(),
        }
    }

    /// Creates a transfer error.
    pub fn transfer(path: impl Into<PathBuf>, bytes_written: u64, source: std::io::Error) -> Self {
        Self::Transfer {
            path: path.into(),
            bytes_written,
            source,
        }
    }

    /// Returns the failure category.
    #[must_use]
    pub fn kind(&self) -> ExportErrorKind {
        match self {
            Self::Usage { .. } => ExportErrorKind::Usage,
            Self::Destination { .. } => ExportErrorKind::Destination,
            Self::Configuration { .. } => ExportErrorKind::Configuration,
            Self::Connection { .. } => ExportErrorKind::Connection,
            Self::Authentication { .. } => ExportErrorKind::Authentication,
            Self::Server { .. } => ExportErrorKind::Server,
            Self::Transfer { .. } => ExportErrorKind::Transfer,
        }
    }

    /// Returns the message shown to the user.
    ///
    /// Server errors surface the body the server sent, everything else a
    /// fixed hint for the failing step.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Usage { .. } => "No filepath provided.".to_string(),
            Self::Destination { .. } => {
                "Export failed - please check the filepath and try again.".to_string()
            }
            Self::Configuration { .. } => {
                "Connection failed - please specify 'http' or 'https' for the scheme.".to_string()
            }
            Self::Connection { .. } => {
                "Connection failed - check the connection details and try again.".to_string()
            }
            Self::Authentication { .. } => {
                "Authentication failed - check the connection details and try again.".to_string()
            }
            Self::Server { status, body, .. } => {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    format!("Export failed - the server responded with HTTP {status}.")
                } else {
                    trimmed.to_string()
                }
            }
            Self::Transfer { .. } => {
                "Export failed - there was an error saving the database content.".to_string()
            }
        }
    }
}

// No `From<reqwest::Error>` or `From<std::io::Error>`: every variant needs
// context (endpoint, path, byte count) the source errors don't carry.
