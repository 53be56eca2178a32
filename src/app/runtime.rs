use std::sync::Arc;
use std::sync::atomic::Ordering;

use anyhow::Result;
use dbexport_core::{ExportClient, ExportProgress, resolve_destination};
use tracing::{debug, info};

use crate::ProcessExit;
use crate::app::{config_runtime, exit_handler, progress_manager, terminal};
use crate::app_config;

pub(crate) async fn run_export() -> Result<ProcessExit> {
    let (args, cli_sources) = config_runtime::parse_cli_with_sources();

    let loaded = app_config::load_config(args.config.as_deref())?;
    let file_config = loaded.config.as_ref();
    let args = config_runtime::apply_config_defaults(args, &cli_sources, file_config);

    let default_level = config_runtime::resolve_default_log_level(&args, &cli_sources, file_config);
    let force_cli_log_level = config_runtime::should_force_cli_log_level(&cli_sources);
    let stderr_terminal = terminal::StderrTerminal::detect();
    terminal::init_tracing(
        default_level,
        force_cli_log_level,
        stderr_terminal.color(args.no_color),
    );

    debug!(
        config_path = ?loaded.path,
        loaded_from_file = file_config.is_some(),
        verbosity = file_config.and_then(|cfg| cfg.verbosity).map(|v| v.as_str()),
        "configuration resolved"
    );

    let destination = match resolve_destination(&args.paths) {
        Ok(path) => path,
        Err(error) => return Ok(exit_handler::report_failure(&error)),
    };
    let params = config_runtime::connection_params(&args);
    debug!(?params, destination = %destination.display(), "export requested");

    let client = match ExportClient::new() {
        Ok(client) => client,
        Err(error) => return Ok(exit_handler::report_failure(&error)),
    };

    let progress = Arc::new(ExportProgress::new());
    let show_progress = stderr_terminal.progress(config_runtime::is_quiet(&args, file_config));
    let (progress_handle, stop) =
        progress_manager::spawn_progress_ui(show_progress, Arc::clone(&progress));

    // Dropping the export future on Ctrl-C closes the response and the file.
    let outcome = tokio::select! {
        result = client.export_with_progress(&params, destination, Some(progress.as_ref())) => Some(result),
        Ok(()) = tokio::signal::ctrl_c() => None,
    };

    stop.store(true, Ordering::SeqCst);
    if let Some(handle) = progress_handle {
        let _ = handle.await;
    }

    match outcome {
        Some(Ok(summary)) => {
            info!(
                path = %summary.path.display(),
                size = %progress_manager::format_bytes(summary.bytes_written),
                content_length = ?summary.content_length,
                "database exported"
            );
            Ok(ProcessExit::Success)
        }
        Some(Err(error)) => Ok(exit_handler::report_failure(&error)),
        None => {
            debug!(
                path = %destination.display(),
                bytes_written = progress.bytes_written(),
                "export interrupted, destination left incomplete"
            );
            eprintln!("Export interrupted.");
            Ok(ProcessExit::Interrupted)
        }
    }
}
