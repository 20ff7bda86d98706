use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::CatalogError;

use super::model::Album;
use super::Catalog;

/// On-disk catalog layout: a list of `[[album]]` tables.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    album: Vec<Album>,
}

impl Catalog {
    /// Parse a TOML catalog. Relative `audio_src`/`cover` paths are resolved
    /// against `base_dir`.
    pub fn from_toml_str(text: &str, base_dir: &Path) -> Result<Self, CatalogError> {
        let file: CatalogFile = toml::from_str(text)?;

        let mut catalog = Catalog::default();
        for mut album in file.album {
            album.cover = album.cover.map(|c| resolve(base_dir, c));
            for song in &mut album.songs {
                song.audio_src = resolve(base_dir, std::mem::take(&mut song.audio_src));
                if !is_valid_duration(song.duration) {
                    warn!(
                        slug = %album.slug,
                        song = %song.title,
                        duration = song.duration,
                        "ignoring invalid duration"
                    );
                    song.duration = f64::NAN;
                }
            }
            catalog.insert(album)?;
        }
        Ok(catalog)
    }

    /// Load a catalog file from disk.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let text = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
        let catalog = Self::from_toml_str(&text, base_dir)?;
        debug!(path = %path.display(), albums = catalog.len(), "loaded catalog");
        Ok(catalog)
    }
}

/// NaN stays as the "unknown" marker; anything else must be a finite,
/// non-negative number of seconds that fits a `Duration`.
fn is_valid_duration(seconds: f64) -> bool {
    seconds.is_nan() || Duration::try_from_secs_f64(seconds).is_ok()
}

fn resolve(base_dir: &Path, p: PathBuf) -> PathBuf {
    if p.is_absolute() { p } else { base_dir.join(p) }
}
