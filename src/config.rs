use std::path::PathBuf;

use clap::Parser;

/// Command-line options.
#[derive(Debug, Clone, Parser)]
#[command(name = "dockdeck", version, about = "Browse and manage Docker images, containers, volumes and networks")]
pub struct Config {
    /// Docker daemon address (unix://, tcp:// or http://). Defaults to the local daemon.
    #[arg(long, env = "DOCKER_HOST")]
    pub host: Option<String>,

    /// Seconds before a daemon request times out.
    #[arg(long, default_value_t = 120)]
    pub timeout: u64,

    /// Log file. The terminal belongs to the UI, so logs never go to stdout.
    #[arg(long, default_value = "dockdeck.log")]
    pub log_file: PathBuf,

    /// Log filter, e.g. `info` or `dockdeck=debug`. RUST_LOG takes precedence.
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
