mod chrome;
mod layout;
mod panes;
mod theme;

use ratatui::{Frame, style::Style, widgets::Block};

use crate::app::App;

use self::chrome::{render_footer, render_shell, render_too_small};
use self::layout::{compute_layout, footer_row};
use self::panes::{render_consumers, render_network, render_ticker, render_vitals};
use self::theme::BG;

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BG)), area);

    let Some(layout) = compute_layout(area) else {
        render_too_small(frame, area);
        render_footer(frame, app, footer_row(area));
        return;
    };

    render_shell(frame, layout.shell);
    render_vitals(frame, app, layout.vitals);
    render_network(frame, app, layout.network);
    render_consumers(frame, app, layout.consumers);
    render_ticker(frame, app, layout.ticker);
    render_footer(frame, app, layout.footer);
}
