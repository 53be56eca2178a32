//! What stderr can show, and the tracing subscriber that writes to it.

use std::io::IsTerminal;

use tracing_subscriber::EnvFilter;

/// Terminal signals read once at startup.
#[derive(Debug, Clone, Copy)]
pub(crate) struct StderrTerminal {
    interactive: bool,
    no_color_env: bool,
    dumb: bool,
}

impl StderrTerminal {
    pub(crate) fn detect() -> Self {
        Self {
            interactive: std::io::stderr().is_terminal(),
            // An empty NO_COLOR does not count.
            no_color_env: std::env::var_os("NO_COLOR").is_some_and(|value| !value.is_empty()),
            dumb: std::env::var("TERM").is_ok_and(|term| term.eq_ignore_ascii_case("dumb")),
        }
    }

    /// ANSI styling in log lines, unless `--no-color`, `NO_COLOR` or `TERM=dumb`.
    pub(crate) fn color(self, no_color_flag: bool) -> bool {
        !(no_color_flag || self.no_color_env || self.dumb)
    }

    /// The progress bar needs an interactive, non-dumb stderr and no `-q`.
    pub(crate) fn progress(self, quiet: bool) -> bool {
        self.interactive && !self.dumb && !quiet
    }
}

/// Installs the stderr subscriber.
///
/// `RUST_LOG` overrides `default_level` unless `-v`/`-q` forced it.
pub(crate) fn init_tracing(default_level: &str, force_cli_level: bool, ansi: bool) {
    let filter = if force_cli_level {
        EnvFilter::new(default_level)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
    };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(ansi)
        .with_env_filter(filter)
        .try_init();
}
