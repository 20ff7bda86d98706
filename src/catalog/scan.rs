use std::path::{Path, PathBuf};

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::{Album, Song};
use super::slugify;

const COVER_STEMS: &[&str] = &["cover", "folder", "front"];
const COVER_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png"];

/// Tag data for one audio file, before it is folded into an album.
struct ScannedTrack {
    path: PathBuf,
    title: String,
    duration: f64,
    disc: u32,
    number: u32,
    album: Option<String>,
    artist: Option<String>,
    year: Option<String>,
}

fn extension_lower(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase())
}

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let Some(ext) = extension_lower(path) else {
        return false;
    };
    settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .any(|e| !e.is_empty() && e == ext)
}

fn is_cover_file(path: &Path) -> bool {
    let stem_ok = path
        .file_stem()
        .and_then(|s| s.to_str())
        .map(|s| COVER_STEMS.contains(&s.to_ascii_lowercase().as_str()))
        .unwrap_or(false);
    let ext_ok = extension_lower(path)
        .map(|e| COVER_EXTENSIONS.contains(&e.as_str()))
        .unwrap_or(false);
    stem_ok && ext_ok
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Parse "3" or "3/12" style position tags.
fn parse_position(raw: &str) -> Option<u32> {
    raw.split('/').next()?.trim().parse().ok()
}

fn non_empty(v: Option<&str>) -> Option<String> {
    v.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn read_track(path: &Path) -> ScannedTrack {
    let mut track = ScannedTrack {
        path: path.to_path_buf(),
        title: path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string(),
        duration: f64::NAN,
        disc: 0,
        number: 0,
        album: None,
        artist: None,
        year: None,
    };

    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            debug!(path = %path.display(), error = %e, "no readable tags");
            return track;
        }
    };

    let duration = tagged.properties().duration();
    if !duration.is_zero() {
        track.duration = duration.as_secs_f64();
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(v) = non_empty(tag.get_string(&ItemKey::TrackTitle)) {
            track.title = v;
        }
        track.album = non_empty(tag.get_string(&ItemKey::AlbumTitle));
        track.artist = non_empty(tag.get_string(&ItemKey::AlbumArtist))
            .or_else(|| non_empty(tag.get_string(&ItemKey::TrackArtist)));
        track.year = non_empty(tag.get_string(&ItemKey::Year));
        track.number = tag
            .get_string(&ItemKey::TrackNumber)
            .and_then(parse_position)
            .unwrap_or(0);
        track.disc = tag
            .get_string(&ItemKey::DiscNumber)
            .and_then(parse_position)
            .unwrap_or(0);
    }

    track
}

/// Build an album from the audio files under `dir`.
///
/// Returns `None` when the directory holds no audio files. Album-level fields
/// come from the first track carrying them and fall back to the directory name.
pub fn scan_album_dir(dir: &Path, settings: &LibrarySettings) -> Option<Album> {
    let mut tracks: Vec<ScannedTrack> = Vec::new();
    let mut cover: Option<PathBuf> = None;

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if is_audio_file(path, settings) {
            tracks.push(read_track(path));
        } else if cover.is_none() && is_cover_file(path) {
            cover = Some(path.to_path_buf());
        }
    }

    if tracks.is_empty() {
        return None;
    }

    tracks.sort_by(|a, b| {
        (a.disc, a.number)
            .cmp(&(b.disc, b.number))
            .then_with(|| {
                let an = a.path.file_name().map(|s| s.to_ascii_lowercase());
                let bn = b.path.file_name().map(|s| s.to_ascii_lowercase());
                an.cmp(&bn)
            })
    });

    let dir_name = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("album")
        .to_string();
    let title = tracks
        .iter()
        .find_map(|t| t.album.clone())
        .unwrap_or_else(|| dir_name.clone());
    let artist = tracks
        .iter()
        .find_map(|t| t.artist.clone())
        .unwrap_or_else(|| "Unknown Artist".to_string());
    let release_info = tracks
        .iter()
        .find_map(|t| t.year.clone())
        .unwrap_or_default();

    let songs = tracks
        .into_iter()
        .map(|t| Song {
            title: t.title,
            audio_src: t.path,
            duration: t.duration,
        })
        .collect();

    Some(Album {
        slug: slugify(&dir_name),
        title,
        artist,
        release_info,
        cover,
        songs,
    })
}

/// Scan every immediate subdirectory of `root` as an album.
pub fn scan_music_dir(root: &Path, settings: &LibrarySettings) -> Vec<Album> {
    let mut dirs: Vec<PathBuf> = match std::fs::read_dir(root) {
        Ok(rd) => rd
            .filter_map(Result::ok)
            .map(|e| e.path())
            .filter(|p| p.is_dir())
            .filter(|p| settings.include_hidden || !is_hidden(p))
            .collect(),
        Err(e) => {
            warn!(root = %root.display(), error = %e, "cannot read music dir");
            return Vec::new();
        }
    };
    dirs.sort();

    dirs.iter()
        .filter_map(|d| scan_album_dir(d, settings))
        .collect()
}
