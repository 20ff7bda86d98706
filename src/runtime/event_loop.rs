use std::sync::mpsc::Receiver;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::warn;

use crate::album::{AlbumController, PlaybackSnapshot};
use crate::app::App;
use crate::config;
use crate::media::MediaHandle;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
#[derive(Debug, Default)]
pub struct EventLoopState {
    /// Internal two-key prefix state used for `gg` handling.
    pub pending_gg: bool,
}

/// Main terminal event loop: handles input, drains media notifications and
/// redraws. Returns `Ok(())` when shutdown is requested.
pub fn run<M: MediaHandle>(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    controller: &mut AlbumController<M>,
    updates: &Receiver<PlaybackSnapshot>,
    app: &mut App,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut snapshot = controller.snapshot();
    loop {
        controller.pump_media_events();
        while let Ok(s) = updates.try_recv() {
            snapshot = s;
        }
        app.sync_to_playing(snapshot.track);

        terminal.draw(|f| {
            ui::draw(
                f,
                controller.album(),
                &snapshot,
                app,
                &settings.ui,
                &settings.controls,
            )
        })?;

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, controller, app, state) {
                    break;
                }
            }
        }
    }

    Ok(())
}

/// Show why no album could be opened until the user quits.
pub fn run_not_found(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    reason: &str,
    known: &[&str],
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        terminal.draw(|f| ui::draw_not_found(f, reason, known, &settings.ui))?;
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press && is_quit(key.code) {
                return Ok(());
            }
        }
    }
}

fn is_quit(code: KeyCode) -> bool {
    matches!(code, KeyCode::Char('q') | KeyCode::Esc)
}

/// Apply one key press. Returns `true` when the app should quit.
pub fn handle_key_event<M: MediaHandle>(
    key: KeyEvent,
    settings: &config::Settings,
    controller: &mut AlbumController<M>,
    app: &mut App,
    state: &mut EventLoopState,
) -> bool {
    if is_quit(key.code) {
        return true;
    }

    let seek_step = f64::from(settings.controls.seek_step_percent) / 100.0;
    let volume_step = i16::from(settings.controls.volume_step);

    // Any key other than `g` cancels a pending `gg`.
    if key.code != KeyCode::Char('g') {
        state.pending_gg = false;
    }

    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            app.follow_playback_off();
            app.next();
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.follow_playback_off();
            app.prev();
        }
        KeyCode::Char('g') => {
            if state.pending_gg {
                state.pending_gg = false;
                app.follow_playback_off();
                app.top();
            } else {
                state.pending_gg = true;
            }
        }
        KeyCode::Char('G') => {
            app.follow_playback_off();
            app.bottom();
        }
        KeyCode::Enter => {
            if let Err(e) = controller.activate_track(app.selected) {
                warn!("row activation failed: {e}");
            }
            if settings.ui.follow_playback {
                app.follow_playback_on();
            }
        }
        KeyCode::Char(' ') | KeyCode::Char('p') => controller.toggle_current(),
        KeyCode::Left | KeyCode::Char('h') => {
            controller.previous();
            if settings.ui.follow_playback {
                app.follow_playback_on();
            }
        }
        KeyCode::Right | KeyCode::Char('l') => {
            controller.next();
            if settings.ui.follow_playback {
                app.follow_playback_on();
            }
        }
        KeyCode::Char('H') => controller.seek_by(-seek_step),
        KeyCode::Char('L') => controller.seek_by(seek_step),
        KeyCode::Char(c @ '0'..='9') => {
            if let Some(n) = c.to_digit(10) {
                controller.seek(f64::from(n) / 10.0);
            }
        }
        KeyCode::Char('-') => controller.adjust_volume(-volume_step),
        KeyCode::Char('+') | KeyCode::Char('=') => controller.adjust_volume(volume_step),
        _ => {}
    }

    false
}
