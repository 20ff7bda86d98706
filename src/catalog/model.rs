use std::path::PathBuf;

use serde::Deserialize;

/// A single track of an album.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Song {
    pub title: String,
    pub audio_src: PathBuf,
    /// Nominal length in seconds. `NaN` when unknown.
    #[serde(default = "unknown_duration")]
    pub duration: f64,
}

/// An album with its ordered song list.
///
/// Song order is meaningful: it defines track numbers and prev/next navigation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Album {
    pub slug: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub release_info: String,
    #[serde(default)]
    pub cover: Option<PathBuf>,
    #[serde(default)]
    pub songs: Vec<Song>,
}

fn unknown_duration() -> f64 {
    f64::NAN
}
