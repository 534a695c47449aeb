//! Command-line interface for the goban client.

use clap::Parser;
use std::path::PathBuf;

/// Goban Client - terminal client for Go-style games against a remote
/// rules service.
#[derive(Parser, Debug)]
#[command(name = "goban_client")]
#[command(about = "Play Go-style games against a remote rules service", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Rules service URL (overrides the config file).
    #[arg(long)]
    pub server_url: Option<String>,

    /// Initial board size offered in setup (overrides the config file).
    #[arg(long)]
    pub board_size: Option<usize>,

    /// Path to the client config file.
    #[arg(long, default_value = "goban.toml")]
    pub config: PathBuf,
}
