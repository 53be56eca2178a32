//! Progress UI (spinner or byte bar) for a running export.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use dbexport_core::ExportProgress;
use indicatif::{HumanBytes, ProgressBar, ProgressStyle};

/// Spawns the progress UI when requested.
/// Returns (handle, stop) so the caller can signal stop and await the handle.
/// When `show_progress` is false, returns (None, stop) with stop already true.
pub(crate) fn spawn_progress_ui(
    show_progress: bool,
    progress: Arc<ExportProgress>,
) -> (Option<tokio::task::JoinHandle<()>>, Arc<AtomicBool>) {
    if !show_progress {
        return (None, Arc::new(AtomicBool::new(true)));
    }
    let stop = Arc::new(AtomicBool::new(false));
    let handle = spawn_progress_inner(progress, Arc::clone(&stop));
    (Some(handle), stop)
}

fn spawn_progress_inner(
    progress: Arc<ExportProgress>,
    stop: Arc<AtomicBool>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(100));
        let mut sized = false;

        while !stop.load(Ordering::SeqCst) {
            if !sized && let Some(total) = progress.content_length() {
                bar.set_length(total);
                bar.set_style(
                    ProgressStyle::with_template(
                        "{spinner} [{bar:30}] {bytes}/{total_bytes} ({bytes_per_sec})",
                    )
                    .unwrap_or_else(|_| ProgressStyle::default_bar()),
                );
                sized = true;
            }

            let written = progress.bytes_written();
            if sized {
                bar.set_position(written);
            } else {
                bar.set_message(format!("Exporting... {}", HumanBytes(written)));
            }
            tokio::time::sleep(Duration::from_millis(120)).await;
        }

        bar.finish_and_clear();
    })
}

/// Human-readable size for log and summary lines.
pub(crate) fn format_bytes(bytes: u64) -> String {
    HumanBytes(bytes).to_string()
}
