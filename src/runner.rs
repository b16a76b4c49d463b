//! The frame loop: sample, draw, check for quit, sleep.

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{Terminal, backend::Backend};
use tracing::info;

use crate::app::App;
use crate::collectors::{FeedBoard, MetricsProvider};
use crate::ui;

/// Source of the user's request to stop.
pub trait QuitSignal {
    /// Consume whatever input is pending without waiting and report whether a
    /// quit key was among it.
    fn quit_requested(&mut self) -> Result<bool>;
}

/// Keyboard input from the controlling terminal.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl QuitSignal for CrosstermInput {
    fn quit_requested(&mut self) -> Result<bool> {
        let mut quit = false;
        while event::poll(Duration::ZERO).context("failed to poll terminal input")? {
            let ev = event::read().context("failed to read terminal input")?;
            if is_quit(&ev) {
                quit = true;
            }
        }
        Ok(quit)
    }
}

fn is_quit(ev: &Event) -> bool {
    match ev {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        }
        _ => false,
    }
}

/// Run ticks until quit is requested or drawing fails.
///
/// Each tick samples network counters once, adopts the latest feed round,
/// freezes everything into `app.data` and only then draws, so a frame never
/// mixes values from two samplings.
pub fn run<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    metrics: &mut dyn MetricsProvider,
    feeds: &mut FeedBoard,
    input: &mut dyn QuitSignal,
    tick: Duration,
) -> Result<()> {
    info!(tick_ms = tick.as_millis() as u64, "frame loop started");

    loop {
        metrics.refresh_network_speeds();
        feeds.sync();
        app.refresh(metrics, &*feeds, &*feeds, Local::now().time());

        let completed = terminal
            .draw(|frame| ui::render(frame, app))
            .context("failed to draw frame")?;
        app.observe_size(completed.area.width, completed.area.height);

        if input.quit_requested()? {
            info!("quit requested");
            return Ok(());
        }

        std::thread::sleep(tick);
    }
}
