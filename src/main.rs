mod app;
mod cli;
mod collectors;
mod config;
mod fmt;
mod runner;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    cursor::{Hide, Show},
    execute,
    terminal::{
        EnterAlternateScreen, LeaveAlternateScreen, SetSize, disable_raw_mode, enable_raw_mode,
    },
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{Level, info, warn};
use tracing_subscriber::EnvFilter;

use app::App;
use cli::Args;
use collectors::{FeedBoard, SysinfoMetrics, spawn_feeds};
use config::Config;
use runner::CrosstermInput;

const PREFERRED_SIZE: (u16, u16) = (120, 38);

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let cfg = Config::load(args.config.as_deref())?;

    if let Err(err) = init_logging(&cfg, args.log_level()) {
        eprintln!("warning: logging disabled: {err:#}");
    }
    info!(version = env!("CARGO_PKG_VERSION"), "termdash starting");

    let feeds = spawn_feeds(&cfg);

    // the frame loop sleeps between ticks, keep it off the async workers
    let result = match tokio::task::spawn_blocking(move || run_terminal(&cfg, feeds)).await {
        Ok(result) => result,
        Err(err) => {
            // the task unwound past its own cleanup
            restore(&mut io::stdout());
            Err(err).context("terminal task panicked")
        }
    };

    match &result {
        Ok(()) => info!("termdash stopped"),
        Err(err) => tracing::error!(error = %format!("{err:#}"), "termdash failed"),
    }
    result
}

/// Take over the terminal, run the frame loop and always hand the terminal
/// back, whether the loop ended cleanly or not.
fn run_terminal(cfg: &Config, mut feeds: FeedBoard) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    if let Err(err) = execute!(stdout, EnterAlternateScreen, Hide) {
        restore(&mut stdout);
        return Err(err).context("failed to enter alternate screen");
    }
    if let Err(err) = execute!(stdout, SetSize(PREFERRED_SIZE.0, PREFERRED_SIZE.1)) {
        warn!(error = %err, "terminal refused resize request");
    }

    let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
        Ok(terminal) => terminal,
        Err(err) => {
            restore(&mut io::stdout());
            return Err(err).context("failed to initialize terminal");
        }
    };

    let mut app = App::new(cfg);
    let mut metrics = SysinfoMetrics::new();
    let run_result = runner::run(
        &mut terminal,
        &mut app,
        &mut metrics,
        &mut feeds,
        &mut CrosstermInput,
        Duration::from_millis(cfg.tick_millis),
    );

    restore(terminal.backend_mut());

    run_result
}

/// Undo everything `run_terminal` set up. Safe to call more than once.
fn restore<W: io::Write>(out: &mut W) {
    disable_raw_mode().ok();
    write_restore(out).ok();
}

fn write_restore<W: io::Write>(out: &mut W) -> io::Result<()> {
    execute!(out, LeaveAlternateScreen, Show)
}

fn init_logging(cfg: &Config, level: Level) -> Result<()> {
    let path = cfg.log_path().context("no cache directory for the log file")?;
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("termdash={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!(err))
        .context("failed to install log subscriber")
}
