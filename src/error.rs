//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Failures when opening an album or selecting one of its tracks.
#[derive(Debug, Error)]
pub enum AlbumError {
    /// No album in the catalog carries this slug.
    #[error("no album with slug {slug:?}")]
    NotFound { slug: String },

    /// The album exists but has nothing to play.
    #[error("album {slug:?} has no songs")]
    EmptyAlbum { slug: String },

    /// A track index outside the album's song list.
    #[error("track {index} out of range (album has {len} songs)")]
    TrackOutOfRange { index: usize, len: usize },
}

/// Failures while building the album catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("duplicate album slug {0:?}")]
    DuplicateSlug(String),
}

/// Failures inside the media backend. These never reach the controller; the
/// audio thread logs them.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("failed to open {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: rodio::decoder::DecoderError,
    },

    #[error("no audio output device: {0}")]
    NoOutputDevice(#[from] rodio::StreamError),
}
