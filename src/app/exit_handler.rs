//! Exit code logic for the export process.
//!
//! Single responsibility: turn an export failure into the user-facing report
//! and the process exit outcome.

use dbexport_core::{ExportError, ExportErrorKind};
use tracing::debug;

use crate::ProcessExit;

/// Maps a failure category to the process exit outcome.
pub(crate) fn exit_for_kind(kind: ExportErrorKind) -> ProcessExit {
    match kind {
        ExportErrorKind::Usage => ProcessExit::Usage,
        _ => ProcessExit::Failure,
    }
}

/// Prints the user message once and picks the exit.
///
/// The technical detail only shows up with `-vv` or `RUST_LOG=debug`.
pub(crate) fn report_failure(error: &ExportError) -> ProcessExit {
    debug!(kind = %error.kind(), error = %error, "export failed");
    eprintln!("{}", error.user_message());
    exit_for_kind(error.kind())
}
