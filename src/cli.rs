//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use dbexport_core::export::constants::{DEFAULT_AUTH, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_SCHEME};

/// Export data from an existing database.
///
/// Retrieves a full dump from the database server's export endpoint and
/// writes it to FILE.
#[derive(Parser, Debug, Clone)]
#[command(name = "dbexport")]
#[command(author, version, about)]
#[command(after_help = "Example:\n  dbexport --auth root:root backup.db")]
pub struct Args {
    /// Destination file for the export (exactly one)
    #[arg(value_name = "FILE")]
    pub paths: Vec<PathBuf>,

    /// Master authentication details to use when connecting
    #[arg(short, long, default_value = DEFAULT_AUTH)]
    pub auth: String,

    /// HTTP connection scheme to use to connect to the database
    #[arg(long, default_value = DEFAULT_SCHEME)]
    pub scheme: String,

    /// Database server host to connect to
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Database server port to connect to
    #[arg(long, default_value = DEFAULT_PORT)]
    pub port: String,

    /// Config file to read defaults from
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase output verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress everything but errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored log output
    #[arg(long)]
    pub no_color: bool,
}
