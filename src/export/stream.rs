//! Bounded-memory copy of a chunked body into a writer.
//!
//! The body is pulled one chunk at a time and pushed through a fixed-capacity
//! [`BufWriter`], so memory stays at one chunk plus the buffer no matter how
//! large the export is.

use std::sync::OnceLock;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::{Stream, StreamExt};
use thiserror::Error;
use tokio::io::{AsyncWrite, AsyncWriteExt, BufWriter};

use super::constants::COPY_BUFFER_SIZE;

/// Live transfer counters shared with the caller (e.g. a progress bar).
#[derive(Debug, Default)]
pub struct ExportProgress {
    bytes_written: AtomicU64,
    content_length: OnceLock<u64>,
}

impl ExportProgress {
    /// Creates an empty progress record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes handed to the destination so far.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written.load(Ordering::Relaxed)
    }

    /// Length announced by the server, when it sent one.
    #[must_use]
    pub fn content_length(&self) -> Option<u64> {
        self.content_length.get().copied()
    }

    pub(crate) fn set_content_length(&self, length: u64) {
        let _ = self.content_length.set(length);
    }

    fn add(&self, bytes: u64) {
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }
}

/// A failed copy, with how far it got.
#[derive(Debug, Error)]
#[error("copy failed after {bytes_written} bytes: {source}")]
pub struct CopyError {
    /// Bytes written before the failure.
    pub bytes_written: u64,
    /// Read or write failure.
    #[source]
    pub source: std::io::Error,
}

/// Streams every chunk of `body` into `writer` and flushes it.
///
/// Chunk read errors and write errors both end the copy. On a read error the
/// buffer is flushed first, so every chunk received before the failure reaches
/// the writer and `bytes_written` matches what it holds.
///
/// # Errors
///
/// Returns [`CopyError`] on the first read or write failure.
pub async fn stream_to_writer<S, B, E, W>(
    mut body: S,
    writer: W,
    progress: Option<&ExportProgress>,
) -> Result<u64, CopyError>
where
    S: Stream<Item = Result<B, E>> + Unpin,
    B: AsRef<[u8]>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
    W: AsyncWrite + Unpin,
{
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, writer);
    let mut bytes_written: u64 = 0;

    while let Some(chunk_result) = body.next().await {
        let chunk = match chunk_result {
            Ok(chunk) => chunk,
            Err(e) => {
                // The read error is the one worth reporting.
                let _ = writer.flush().await;
                return Err(CopyError {
                    bytes_written,
                    source: std::io::Error::other(e),
                });
            }
        };
        let chunk = chunk.as_ref();

        writer
            .write_all(chunk)
            .await
            .map_err(|source| CopyError {
                bytes_written,
                source,
            })?;

        let len = chunk.len() as u64;
        bytes_written += len;
        if let Some(progress) = progress {
            progress.add(len);
        }
    }

    writer.flush().await.map_err(|source| CopyError {
        bytes_written,
        source,
    })?;

    Ok(bytes_written)
}
