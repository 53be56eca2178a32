//! HTTP client for the database export endpoint.
//!
//! [`ExportClient::export`] runs one export from start to finish: open the
//! destination, validate the scheme, build the authenticated request, check
//! the response status and stream the body into the file.

use std::path::{Path, PathBuf};

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use tracing::{debug, instrument};

use super::constants::EXPORT_CONTENT_TYPE;
use super::destination::open_destination;
use super::error::ExportError;
use super::params::ConnectionParams;
use super::stream::{ExportProgress, stream_to_writer};
use crate::user_agent;

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    /// Destination the body was written to.
    pub path: PathBuf,
    /// Number of body bytes written.
    pub bytes_written: u64,
    /// Length announced by the server, if any.
    pub content_length: Option<u64>,
}

/// Client for the `/export` endpoint.
///
/// Wraps a default-configured [`reqwest::Client`]: no custom timeouts, no
/// retries and the stock redirect policy. Only the User-Agent is set.
#[derive(Debug, Clone)]
pub struct ExportClient {
    client: Client,
}

impl ExportClient {
    /// Creates a client with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Connection`] if the HTTP client cannot be
    /// initialised (for example when no TLS backend is available).
    pub fn new() -> Result<Self, ExportError> {
        let client = Client::builder()
            .user_agent(user_agent::default_export_user_agent())
            .build()
            .map_err(|e| ExportError::connection("<client>", format!("client init: {e}")))?;
        Ok(Self { client })
    }

    /// Wraps an existing reqwest client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    /// Exports the database behind `params` into `destination`.
    ///
    /// The destination is created or truncated first, so it exists even when
    /// a later step fails. A failed transfer leaves whatever was written so
    /// far in place.
    ///
    /// # Errors
    ///
    /// Returns the first failing step as an [`ExportError`]; see
    /// [`ExportErrorKind`](super::ExportErrorKind) for the categories.
    pub async fn export(
        &self,
        params: &ConnectionParams,
        destination: &Path,
    ) -> Result<ExportSummary, ExportError> {
        self.export_with_progress(params, destination, None).await
    }

    /// Same as [`export`](Self::export), reporting bytes into `progress`.
    ///
    /// # Errors
    ///
    /// Returns the same errors as [`export`](Self::export).
    #[instrument(
        name = "export",
        skip(self, params, destination, progress),
        fields(endpoint = %params.redacted_endpoint(), destination = %destination.display())
    )]
    pub async fn export_with_progress(
        &self,
        params: &ConnectionParams,
        destination: &Path,
        progress: Option<&ExportProgress>,
    ) -> Result<ExportSummary, ExportError> {
        let mut file = open_destination(destination).await?;

        let scheme = params.scheme()?;
        let url = params.endpoint_url()?;
        let endpoint = params.redacted_endpoint();
        debug!(%scheme, "endpoint resolved");

        let response = self
            .client
            .get(url)
            .header(CONTENT_TYPE, EXPORT_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| ExportError::network(endpoint.clone(), e))?;

        let status = response.status();
        debug!(status = status.as_u16(), "export response received");

        if status == StatusCode::UNAUTHORIZED {
            debug!("export rejected credentials");
            return Err(ExportError::authentication(endpoint));
        }

        if status != StatusCode::OK {
            // Error payloads are small diagnostics, unlike the export itself.
            let body = match response.bytes().await {
                Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
                Err(e) => {
                    debug!(error = %e, "failed to read error body");
                    String::new()
                }
            };
            debug!(status = status.as_u16(), "export failed on server");
            return Err(ExportError::server(endpoint, status.as_u16(), body));
        }

        let content_length = response.content_length();
        if let (Some(progress), Some(length)) = (progress, content_length) {
            progress.set_content_length(length);
        }

        let bytes_written = stream_to_writer(response.bytes_stream(), &mut file, progress)
            .await
            .map_err(|e| {
                debug!(
                    path = %destination.display(),
                    bytes_written = e.bytes_written,
                    "export interrupted, destination left incomplete"
                );
                ExportError::transfer(destination, e.bytes_written, e.source)
            })?;

        debug!(
            path = %destination.display(),
            bytes = bytes_written,
            "export body written"
        );

        Ok(ExportSummary {
            path: destination.to_path_buf(),
            bytes_written,
            content_length,
        })
    }
}

/// Runs one export with a freshly built [`ExportClient`].
///
/// # Errors
///
/// Returns the same errors as [`ExportClient::export`].
pub async fn export(
    params: &ConnectionParams,
    destination: &Path,
) -> Result<ExportSummary, ExportError> {
    ExportClient::new()?.export(params, destination).await
}
