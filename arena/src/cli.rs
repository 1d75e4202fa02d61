use clap::Parser;
use std::path::PathBuf;

/// Parse and resolve package dependency specifications
#[derive(Parser, Debug, Clone)]
#[command(name = "arena")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Dependency url(s) and (optionally) version specification,
    /// e.g. https://github.com/owner/repo@from:1.2.3
    #[arg(value_name = "DEPENDENCY")]
    pub dependencies: Vec<String>,

    /// Print resolved dependencies as JSON
    #[arg(long)]
    pub json: bool,

    /// Do not look up latest releases over the network
    #[arg(long)]
    pub offline: bool,

    /// Path to a config file (defaults to <config dir>/arena/arena.toml)
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Default log filter when RUST_LOG is not set
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }
}
