//! UI rendering helpers for the terminal user interface.
//!
//! This module contains functions to render the TUI using `ratatui`.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Cell, Padding, Paragraph, Row, Table, TableState, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::album::{PlaybackSnapshot, format_duration};
use crate::app::App;
use crate::catalog::Album;
use crate::config::{ControlsSettings, UiSettings};

pub mod player_bar;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("j/k", "up/down");
    map.insert("gg/G", "top/bottom");
    map.insert("enter", "play/pause row");
    map.insert("space/p", "play/pause");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from config.
    map.insert("0-9", "seek to n/10");
    map.insert("-/+", "volume");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the seek step.
fn controls_text(seek_step_percent: u8) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = [
        "j/k", "h/l", "H/L", "enter", "space/p", "0-9", "-/+", "gg/G", "q",
    ];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                Some(format!("[H/L] seek -/+{}%", seek_step_percent))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{}] {}", k, v))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Marker shown in the number column of the current song.
fn row_marker(index: usize, snapshot: &PlaybackSnapshot) -> String {
    if index != snapshot.track {
        return format!("{}", index + 1);
    }
    if snapshot.playing {
        "▶".to_string()
    } else {
        "‖".to_string()
    }
}

fn album_info_lines(album: &Album) -> Vec<Line<'_>> {
    let mut lines = vec![
        Line::from(album.title.as_str()).bold(),
        Line::from(album.artist.as_str()),
    ];
    let mut extra: Vec<String> = Vec::new();
    if !album.release_info.trim().is_empty() {
        extra.push(album.release_info.clone());
    }
    if let Some(cover) = &album.cover {
        extra.push(format!("cover: {}", cover.display()));
    }
    lines.push(Line::from(extra.join(" • ")).italic());
    lines
}

/// Render the album screen into the provided `frame`.
pub fn draw(
    frame: &mut Frame,
    album: &Album,
    snapshot: &PlaybackSnapshot,
    app: &App,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Min(3),
            Constraint::Length(5),
            Constraint::Length(4),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" platter ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // Album info
    let info = Paragraph::new(album_info_lines(album))
        .block(Block::bordered().padding(Padding::horizontal(1)).title(" album "))
        .wrap(Wrap { trim: true });
    frame.render_widget(info, chunks[1]);

    // Song list
    let rows: Vec<Row> = album
        .songs
        .iter()
        .enumerate()
        .map(|(i, song)| {
            let row = Row::new(vec![
                Cell::from(row_marker(i, snapshot)),
                Cell::from(song.title.as_str()),
                Cell::from(format_duration(song.duration)),
            ]);
            if i == snapshot.track {
                row.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(7),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(" tracks "))
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    .highlight_symbol("> ");
    let mut state = TableState::default();
    if !album.songs.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(table, chunks[2], &mut state);

    player_bar::render(frame, chunks[3], snapshot, format_duration);

    let footer = Paragraph::new(controls_text(controls_settings.seek_step_percent))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding::horizontal(1)),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[4]);
}

/// Render the screen shown when the requested album cannot be opened.
/// `reason` is the error to show, e.g. an unknown slug or an empty album.
pub fn draw_not_found(frame: &mut Frame, reason: &str, known: &[&str], ui_settings: &UiSettings) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" platter ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    let mut lines = vec![
        Line::from(format!("Cannot open album: {}", reason)).bold(),
        Line::from(""),
    ];
    if known.is_empty() {
        lines.push(Line::from("The catalog is empty."));
    } else {
        lines.push(Line::from("Known albums:"));
        lines.extend(known.iter().map(|s| Line::from(format!("  {}", s))));
    }
    lines.push(Line::from(""));
    lines.push(Line::from("[q] quit").italic());

    let body = Paragraph::new(lines)
        .block(Block::bordered().padding(Padding::horizontal(1)).title(" no album "))
        .wrap(Wrap { trim: false });
    frame.render_widget(body, chunks[1]);
}
