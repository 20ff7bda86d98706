//! The transport bar: controls, current song, progress and volume.
//!
//! Purely presentational; every interaction goes through the controller.

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Gauge, LineGauge, Padding, Paragraph},
};

use crate::album::PlaybackSnapshot;

/// Text between the seek bar's ends, e.g. `1:05 / 3:20`.
pub fn time_label(snapshot: &PlaybackSnapshot, fmt: fn(f64) -> String) -> String {
    format!("{} / {}", fmt(snapshot.position), fmt(snapshot.duration))
}

fn transport_line(snapshot: &PlaybackSnapshot) -> Line<'static> {
    let toggle = if snapshot.playing { " || " } else { " |> " };
    Line::from(vec![
        Span::raw(" |<< "),
        Span::styled(toggle, Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(" >>| "),
        Span::raw("   "),
        Span::raw(snapshot.song_title.clone()).italic(),
    ])
}

pub fn render(frame: &mut Frame, area: Rect, snapshot: &PlaybackSnapshot, fmt: fn(f64) -> String) {
    let block = Block::bordered()
        .title(" player ")
        .padding(Padding::horizontal(1));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(transport_line(snapshot)), rows[0]);

    // Unknown duration leaves the bar empty; the label still shows `-:--`.
    let progress = Gauge::default()
        .ratio(snapshot.progress().unwrap_or(0.0))
        .label(time_label(snapshot, fmt))
        .gauge_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_widget(progress, rows[1]);

    let volume = LineGauge::default()
        .ratio(f64::from(snapshot.volume) / 100.0)
        .label(format!("vol {:>3}", snapshot.volume));
    frame.render_widget(volume, rows[2]);
}
