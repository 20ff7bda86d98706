//! Media-related small types and handles.
//!
//! Commands flow from the owning `RodioMedia` into the audio thread; events
//! flow back out. `MediaInfo` is the state both sides can read.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Debug)]
pub enum MediaCmd {
    /// Replace the loaded source.
    SetSource(PathBuf),
    /// Drop the loaded source, fading out over `fade_out_ms` milliseconds.
    Unload { fade_out_ms: u64 },
    /// Start or resume playback of the loaded source.
    Play,
    /// Pause playback, keeping the position.
    Pause,
    /// Jump to an absolute position in the loaded source.
    Seek(Duration),
    /// Set output volume, 0.0 to 1.0.
    SetVolume(f32),
    /// Stop and leave the audio thread.
    Quit,
}

/// Change notifications emitted by a media handle.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MediaEvent {
    /// The playback position moved.
    TimeUpdate,
    /// The loaded source's duration became known or changed.
    DurationChange,
    /// The output volume changed.
    VolumeChange,
}

#[derive(Debug, Clone)]
/// Playback state published by the audio thread.
pub struct MediaInfo {
    pub position: Duration,
    /// `None` until the source's length is known.
    pub duration: Option<Duration>,
    pub volume: f32,
}

impl Default for MediaInfo {
    fn default() -> Self {
        Self {
            position: Duration::ZERO,
            duration: None,
            volume: 1.0,
        }
    }
}

pub type MediaInfoHandle = Arc<Mutex<MediaInfo>>;
