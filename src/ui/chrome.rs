use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::app::App;

use super::layout::{MIN_HEIGHT, MIN_WIDTH};
use super::theme::{BG, HIGHLIGHT, TEXT};

pub fn render_shell(frame: &mut Frame, area: Rect) {
    frame.render_widget(pane_block(" TERMDASH "), area);
}

pub fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let footer = format!("ONLINE | {} | q = EXIT", app.data.clock.format("%H:%M:%S"));
    let p = Paragraph::new(Line::from(Span::styled(footer, Style::default().fg(TEXT))))
        .alignment(Alignment::Center)
        .style(Style::default().bg(BG));
    frame.render_widget(p, area);
}

pub fn render_too_small(frame: &mut Frame, area: Rect) {
    let msg = format!(
        "terminal too small ({}x{}, need {MIN_WIDTH}x{MIN_HEIGHT})",
        area.width, area.height
    );
    let y = area.y + area.height.saturating_sub(1) / 2;
    let row = Rect::new(area.x, y, area.width, area.height.min(1));
    let p = Paragraph::new(Line::from(Span::styled(msg, Style::default().fg(HIGHLIGHT))))
        .alignment(Alignment::Center);
    frame.render_widget(p, row);
}

/// Single-line bordered block with the title in the highlight color.
pub fn pane_block(title: &str) -> Block<'_> {
    Block::default()
        .title(Span::styled(title, Style::default().fg(HIGHLIGHT)))
        .title_alignment(Alignment::Left)
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(Style::default().fg(TEXT))
        .style(Style::default().bg(BG))
}
