use std::path::PathBuf;

use clap::Parser;
use tracing::Level;

/// Terminal status dashboard.
#[derive(Parser, Debug)]
#[command(name = "termdash", about = "Terminal status dashboard", version)]
pub struct Args {
    /// Config file to load instead of the default locations.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Increase logging verbosity (-v for debug, -vv for trace). Default is info level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode - only log errors.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn log_level(&self) -> Level {
        if self.quiet {
            return Level::ERROR;
        }
        match self.verbose {
            0 => Level::INFO,
            1 => Level::DEBUG,
            _ => Level::TRACE,
        }
    }
}
