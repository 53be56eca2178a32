//! CLI parsing with value sources, file-config merging and log level choice.

use clap::{ArgMatches, CommandFactory, FromArgMatches, parser::ValueSource};
use dbexport_core::ConnectionParams;

use crate::app_config::{FileConfig, VerbositySetting};
use crate::cli::Args;

/// Which fields were given explicitly on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct CliValueSources {
    pub(crate) auth: bool,
    pub(crate) scheme: bool,
    pub(crate) host: bool,
    pub(crate) port: bool,
    pub(crate) verbose: bool,
    pub(crate) quiet: bool,
}

pub(crate) fn parse_cli_with_sources() -> (Args, CliValueSources) {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|err| err.exit());
    (args, sources_from_matches(&matches))
}

fn sources_from_matches(matches: &ArgMatches) -> CliValueSources {
    CliValueSources {
        auth: is_commandline_value(matches, "auth"),
        scheme: is_commandline_value(matches, "scheme"),
        host: is_commandline_value(matches, "host"),
        port: is_commandline_value(matches, "port"),
        verbose: is_commandline_value(matches, "verbose"),
        quiet: is_commandline_value(matches, "quiet"),
    }
}

fn is_commandline_value(matches: &ArgMatches, id: &str) -> bool {
    matches.value_source(id) == Some(ValueSource::CommandLine)
}

/// Fills every connection field not given on the command line from the file.
pub(crate) fn apply_config_defaults(
    mut args: Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> Args {
    let Some(file_config) = file_config else {
        return args;
    };

    let fields = [
        (cli_sources.auth, &mut args.auth, &file_config.auth),
        (cli_sources.scheme, &mut args.scheme, &file_config.scheme),
        (cli_sources.host, &mut args.host, &file_config.host),
        (cli_sources.port, &mut args.port, &file_config.port),
    ];
    for (from_cli, target, configured) in fields {
        if !from_cli && let Some(value) = configured {
            target.clone_from(value);
        }
    }
    args
}

/// Connection parameters handed to the export core.
pub(crate) fn connection_params(args: &Args) -> ConnectionParams {
    ConnectionParams::new(&args.scheme, &args.host, &args.port, &args.auth)
}

/// Picks the default log level.
///
/// CLI flags win over the file `verbosity`; with neither, only warnings and
/// errors are shown so a successful export prints nothing.
pub(crate) fn resolve_default_log_level(
    args: &Args,
    cli_sources: &CliValueSources,
    file_config: Option<&FileConfig>,
) -> &'static str {
    if args.quiet {
        return "error";
    }
    if cli_sources.verbose {
        return match args.verbose {
            1 => "info",
            2 => "debug",
            _ => "trace",
        };
    }
    match file_config.and_then(|cfg| cfg.verbosity) {
        Some(VerbositySetting::Verbose) => "info",
        Some(VerbositySetting::Debug) => "debug",
        Some(VerbositySetting::Quiet) => "error",
        Some(VerbositySetting::Default) | None => "warn",
    }
}

pub(crate) fn should_force_cli_log_level(cli_sources: &CliValueSources) -> bool {
    cli_sources.verbose || cli_sources.quiet
}

/// Whether progress output is suppressed by flags or file config.
pub(crate) fn is_quiet(args: &Args, file_config: Option<&FileConfig>) -> bool {
    args.quiet
        || (args.verbose == 0
            && file_config.and_then(|cfg| cfg.verbosity) == Some(VerbositySetting::Quiet))
}
