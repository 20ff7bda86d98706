use std::env;
use std::path::Path;

use crossterm::execute;
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode};
use ratatui::{Terminal, backend::CrosstermBackend};
use tracing::{info, warn};

use crate::album::AlbumController;
use crate::app::App;
use crate::catalog::{Catalog, scan_album_dir, scan_music_dir};
use crate::config::Settings;
use crate::media::RodioMedia;

mod event_loop;
mod logging;
mod settings;

/// Build the catalog for this run and pick the album to open.
///
/// A directory argument is scanned as a single album. Otherwise the catalog
/// file and the music directory are merged; the argument names a slug, and
/// without one the first album opens.
fn resolve_target(arg: Option<&str>, settings: &Settings) -> (Catalog, String) {
    if let Some(dir) = arg.map(Path::new).filter(|p| p.is_dir()) {
        let catalog: Catalog = scan_album_dir(dir, &settings.library).into_iter().collect();
        let slug = catalog
            .first()
            .map(|a| a.slug.clone())
            .unwrap_or_else(|| dir.display().to_string());
        return (catalog, slug);
    }

    let mut catalog = Catalog::default();
    if let Some(path) = settings.catalog_path() {
        if path.exists() {
            match Catalog::load(&path) {
                Ok(c) => catalog = c,
                Err(e) => warn!("ignoring catalog {}: {e}", path.display()),
            }
        }
    }
    if let Some(root) = &settings.library.music_dir {
        catalog.merge(scan_music_dir(root, &settings.library).into_iter().collect());
    }

    let slug = match arg {
        Some(s) => s.to_string(),
        None => catalog.first().map(|a| a.slug.clone()).unwrap_or_default(),
    };
    (catalog, slug)
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let (settings, config_problem) = settings::load_settings();
    logging::init(&settings);
    if let Some(msg) = config_problem {
        warn!("{msg}");
    }

    let arg = env::args().nth(1);
    let (catalog, slug) = resolve_target(arg.as_deref(), &settings);
    info!(albums = catalog.len(), slug = %slug, "starting");

    let media = RodioMedia::new(&settings.audio);
    let opened = AlbumController::open(&catalog, &slug, media, settings.audio.initial_volume);

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let run_result: Result<(), Box<dyn std::error::Error>> = match opened {
        Ok(mut controller) => {
            let updates = controller.subscribe();
            let mut app = App::new(controller.album().songs.len());
            app.follow_playback = settings.ui.follow_playback;
            let mut state = event_loop::EventLoopState::default();
            event_loop::run(
                &mut terminal,
                &settings,
                &mut controller,
                &updates,
                &mut app,
                &mut state,
            )
        }
        Err(e) => {
            warn!("{e}");
            event_loop::run_not_found(&mut terminal, &settings, &e.to_string(), &catalog.slugs())
        }
    };

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    run_result
}

#[cfg(test)]
mod tests;
