use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::Settings;

/// Send `tracing` output to the log file. The terminal belongs to the TUI,
/// so nothing is written to stderr; if the file cannot be opened logging is
/// simply off.
pub fn init(settings: &Settings) {
    let Some(path) = settings.log_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if fs::create_dir_all(parent).is_err() {
            return;
        }
    }
    let Ok(file) = OpenOptions::new().create(true).append(true).open(&path) else {
        return;
    };

    let filter = EnvFilter::try_from_env("PLATTER_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let _ = tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_env_filter(filter)
        .try_init();
}
