use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{AlertThresholds, App, Gauge};
use crate::collectors::NOT_AVAILABLE;
use crate::fmt::{format_byte_rate, format_usd, truncate_name};

use super::chrome::pane_block;
use super::theme::{ALERT, DIM, HIGHLIGHT, TEXT};

const GAUGE_CELL: &str = "█";

pub fn render_vitals(frame: &mut Frame, app: &App, area: Rect) {
    let vitals = &app.data.vitals;
    let block = pane_block(" SYSTEM VITALS ");
    let content = block.inner(area).inner(Margin {
        vertical: 1,
        horizontal: 1,
    });
    frame.render_widget(block, area);

    let width = content.width;
    let mut lines = Vec::with_capacity(10);
    for (label, gauge, ratio) in [
        ("CPU USAGE", Gauge::Cpu, vitals.cpu_load),
        ("RAM USAGE", Gauge::Memory, vitals.memory_usage),
        ("STORAGE  ", Gauge::Storage, vitals.storage_usage),
    ] {
        lines.push(Line::from(vec![
            Span::styled(label, Style::default().fg(TEXT)),
            Span::styled(
                format!(" {:>5.1}%", ratio.clamp(0.0, 1.0) * 100.0),
                Style::default().fg(TEXT),
            ),
        ]));
        let fill = if app.alerts.gauge_exceeded(gauge, ratio) {
            ALERT
        } else {
            HIGHLIGHT
        };
        lines.push(gauge_line(ratio, width, fill));
    }

    lines.push(Line::from(vec![
        Span::styled("CPU TEMP : ", Style::default().fg(TEXT)),
        temperature_span(vitals.cpu_temperature, &app.alerts),
    ]));
    lines.push(kv_line("BATTERY  : ", vitals.battery.clone()));
    lines.push(kv_line("PROCESSES: ", vitals.process_count.to_string()));
    lines.push(kv_line("THREADS  : ", vitals.thread_count.to_string()));

    frame.render_widget(Paragraph::new(lines), content);
}

pub fn render_network(frame: &mut Frame, app: &App, area: Rect) {
    let env = &app.data.environment;
    let block = pane_block(" NETWORK & ENV ");
    let content = block.inner(area).inner(Margin {
        vertical: 1,
        horizontal: 1,
    });
    frame.render_widget(block, area);

    let lines = vec![
        kv_line("OS      : ", env.os_name.clone()),
        kv_line("UPTIME  : ", env.uptime.clone()),
        kv_line("BRANCH  : ", env.git_branch.clone()),
        kv_line("WEATHER : ", env.weather.clone()),
        Line::from(""),
        kv_line("FAN SPD : ", env.fan_speed.clone()),
        Line::from(""),
        kv_line("NET DOWN: ", format!("{}/s", format_byte_rate(env.net_down_bps))),
        kv_line("NET UP  : ", format!("{}/s", format_byte_rate(env.net_up_bps))),
    ];

    frame.render_widget(Paragraph::new(lines), content);
}

pub fn render_consumers(frame: &mut Frame, app: &App, area: Rect) {
    let block = pane_block(" PARASITE RADAR ");
    let content = block.inner(area).inner(Margin {
        vertical: 0,
        horizontal: 1,
    });
    frame.render_widget(block, area);

    let name_width = (content.width as usize).saturating_sub(12);
    let mut lines = vec![
        Line::from(Span::styled("[!] TOP CONSUMERS", Style::default().fg(ALERT))),
        Line::from(""),
    ];
    for (idx, p) in app.data.top_consumers.iter().enumerate() {
        let color = if idx == 0 { ALERT } else { TEXT };
        lines.push(Line::from(Span::styled(
            format!(
                "{}. {} ({:.1}%)",
                idx + 1,
                truncate_name(&p.name, name_width),
                p.cpu_usage
            ),
            Style::default().fg(color),
        )));
    }

    frame.render_widget(Paragraph::new(lines), content);
}

/// Each tracked symbol owns the row at its index; symbols without a price
/// leave their row empty rather than pulling later rows up.
pub fn render_ticker(frame: &mut Frame, app: &App, area: Rect) {
    let block = pane_block(" CRYPTO TICKER ");
    let content = block.inner(area).inner(Margin {
        vertical: 0,
        horizontal: 1,
    });
    frame.render_widget(block, area);

    for (idx, quote) in app.data.tickers.iter().enumerate() {
        let Some(price) = quote.price else {
            continue;
        };
        let y = content.y + 1 + idx as u16;
        if y >= content.bottom() {
            break;
        }
        let row = Rect::new(content.x, y, content.width, 1);
        let line = Line::from(vec![
            Span::styled(format!("{} : ", quote.symbol), Style::default().fg(TEXT)),
            Span::styled(
                format!("${}", format_usd(price)),
                Style::default().fg(HIGHLIGHT),
            ),
        ]);
        frame.render_widget(Paragraph::new(line), row);
    }
}

/// Number of highlighted cells for a gauge `width` cells wide.
pub fn filled_cells(width: u16, ratio: f64) -> u16 {
    if !ratio.is_finite() {
        return 0;
    }
    (f64::from(width) * ratio.clamp(0.0, 1.0)).floor() as u16
}

fn gauge_line(ratio: f64, width: u16, fill: Color) -> Line<'static> {
    let filled = filled_cells(width, ratio);
    Line::from(vec![
        Span::styled(GAUGE_CELL.repeat(filled as usize), Style::default().fg(fill)),
        Span::styled(
            GAUGE_CELL.repeat((width - filled) as usize),
            Style::default().fg(DIM),
        ),
    ])
}

fn temperature_span(celsius: Option<f64>, alerts: &AlertThresholds) -> Span<'static> {
    match celsius {
        Some(t) if t > 0.0 => {
            let color = if alerts.temperature_exceeded(t) {
                ALERT
            } else {
                HIGHLIGHT
            };
            Span::styled(format!("{t:.1} C"), Style::default().fg(color))
        }
        _ => Span::styled(NOT_AVAILABLE, Style::default().fg(HIGHLIGHT)),
    }
}

fn kv_line(label: &'static str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(label, Style::default().fg(TEXT)),
        Span::styled(value, Style::default().fg(HIGHLIGHT)),
    ])
}
