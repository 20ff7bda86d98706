use std::sync::mpsc::{self, Receiver, Sender};

use tracing::{debug, info};

use crate::catalog::{Album, Catalog, Song};
use crate::error::AlbumError;
use crate::media::{MediaEvent, MediaHandle};

use super::snapshot::PlaybackSnapshot;

pub const MAX_VOLUME: u8 = 100;

/// Playback state for one album, bound to exactly one media handle.
///
/// The handle is released when the controller is dropped.
pub struct AlbumController<M: MediaHandle> {
    album: Album,
    current: usize,
    position: f64,
    duration: f64,
    volume: u8,
    playing: bool,
    media: M,
    subscribers: Vec<Sender<PlaybackSnapshot>>,
}

impl<M: MediaHandle> AlbumController<M> {
    /// Look up `slug` in `catalog` and bind `media` to its first song.
    pub fn open(
        catalog: &Catalog,
        slug: &str,
        media: M,
        initial_volume: u8,
    ) -> Result<Self, AlbumError> {
        let album = catalog.find(slug).ok_or_else(|| AlbumError::NotFound {
            slug: slug.to_string(),
        })?;
        Self::new(album.clone(), media, initial_volume)
    }

    /// Bind `media` to the first song of `album`. Playback does not start.
    pub fn new(album: Album, mut media: M, initial_volume: u8) -> Result<Self, AlbumError> {
        let Some(first) = album.songs.first() else {
            return Err(AlbumError::EmptyAlbum { slug: album.slug });
        };

        let volume = initial_volume.min(MAX_VOLUME);
        let duration = known_seconds(first.duration).unwrap_or(f64::NAN);
        media.set_source(&first.audio_src);
        media.set_volume(volume_to_gain(volume));

        info!(
            slug = %album.slug,
            songs = album.songs.len(),
            "opened album"
        );

        Ok(Self {
            album,
            current: 0,
            position: 0.0,
            duration,
            volume,
            playing: false,
            media,
            subscribers: Vec::new(),
        })
    }

    pub fn album(&self) -> &Album {
        &self.album
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current_song(&self) -> &Song {
        &self.album.songs[self.current]
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn volume(&self) -> u8 {
        self.volume
    }

    pub fn snapshot(&self) -> PlaybackSnapshot {
        PlaybackSnapshot {
            playing: self.playing,
            track: self.current,
            song_title: self.current_song().title.clone(),
            position: self.position,
            duration: self.duration,
            volume: self.volume,
        }
    }

    /// Receive a snapshot after every state change.
    pub fn subscribe(&mut self) -> Receiver<PlaybackSnapshot> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self) {
        if self.subscribers.is_empty() {
            return;
        }
        let snapshot = self.snapshot();
        self.subscribers
            .retain(|tx| tx.send(snapshot.clone()).is_ok());
    }

    pub fn play(&mut self) {
        debug!(track = self.current, "play");
        self.media.play();
        self.playing = true;
        self.notify();
    }

    pub fn pause(&mut self) {
        debug!(track = self.current, "pause");
        self.media.pause();
        self.playing = false;
        self.notify();
    }

    /// Point the handle at song `index`. Does not start or resume playback.
    pub fn set_song(&mut self, index: usize) -> Result<(), AlbumError> {
        self.check_index(index)?;
        self.switch_to(index);
        Ok(())
    }

    fn switch_to(&mut self, index: usize) {
        debug!(from = self.current, to = index, "set song");
        self.media.set_source(&self.album.songs[index].audio_src);
        self.current = index;
        self.notify();
    }

    fn check_index(&self, index: usize) -> Result<(), AlbumError> {
        let len = self.album.songs.len();
        if index < len {
            Ok(())
        } else {
            Err(AlbumError::TrackOutOfRange { index, len })
        }
    }

    /// A click on a track row: pauses the current song if it is playing,
    /// otherwise (re)starts playback from `index`.
    pub fn activate_track(&mut self, index: usize) -> Result<(), AlbumError> {
        self.check_index(index)?;
        let is_same = index == self.current;
        if self.playing && is_same {
            self.pause();
        } else {
            if !is_same {
                self.switch_to(index);
            }
            self.play();
        }
        Ok(())
    }

    /// The player bar's play/pause button: a row activation of the current
    /// song.
    pub fn toggle_current(&mut self) {
        if self.playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Play the previous song; the first song replays itself.
    pub fn previous(&mut self) {
        let index = self.current.saturating_sub(1);
        self.switch_to(index);
        self.play();
    }

    /// Play the next song; the last song replays itself.
    pub fn next(&mut self) {
        let last = self.album.songs.len() - 1;
        let index = (self.current + 1).min(last);
        self.switch_to(index);
        self.play();
    }

    /// Jump to `fraction` (clamped to 0..=1) of the current song.
    ///
    /// Uses the handle's duration, falling back to the song's nominal length
    /// while the handle is still loading. No-op when neither is known.
    pub fn seek(&mut self, fraction: f64) {
        let fraction = if fraction.is_nan() {
            0.0
        } else {
            fraction.clamp(0.0, 1.0)
        };

        let duration = known_seconds(self.media.duration())
            .or_else(|| known_seconds(self.current_song().duration));
        let Some(duration) = duration else {
            debug!(fraction, "seek ignored, duration unknown");
            return;
        };

        let target = duration * fraction;
        debug!(target, "seek");
        self.media.set_position(target);
        self.position = target;
        self.notify();
    }

    /// Seek relative to the current position by `delta` of the song length.
    pub fn seek_by(&mut self, delta: f64) {
        if !(self.duration.is_finite() && self.duration > 0.0) {
            return;
        }
        self.seek(self.position / self.duration + delta);
    }

    /// Set volume from a 0..=100 control; larger values clamp to 100.
    pub fn set_volume(&mut self, level: u8) {
        let level = level.min(MAX_VOLUME);
        debug!(level, "volume");
        self.volume = level;
        self.media.set_volume(volume_to_gain(level));
        self.notify();
    }

    pub fn adjust_volume(&mut self, delta: i16) {
        let level = (i16::from(self.volume) + delta).clamp(0, i16::from(MAX_VOLUME));
        self.set_volume(level as u8);
    }

    /// Dispatch pending handle notifications. Returns how many were handled.
    pub fn pump_media_events(&mut self) -> usize {
        let events = self.media.poll_events();
        for ev in &events {
            match ev {
                MediaEvent::TimeUpdate => self.on_time_update(),
                MediaEvent::DurationChange => self.on_duration_change(),
                MediaEvent::VolumeChange => self.on_volume_change(),
            }
        }
        events.len()
    }

    fn on_time_update(&mut self) {
        let mut pos = self.media.position().max(0.0);
        if self.duration.is_finite() {
            pos = pos.min(self.duration);
        }
        self.position = pos;
        self.notify();
    }

    fn on_duration_change(&mut self) {
        self.duration = known_seconds(self.media.duration()).unwrap_or(f64::NAN);
        if self.duration.is_finite() {
            self.position = self.position.min(self.duration);
        }
        self.notify();
    }

    // The controller's own volume stays authoritative; the handle's value is
    // only logged, never copied back.
    fn on_volume_change(&mut self) {
        debug!(
            handle = self.media.volume(),
            level = self.volume,
            "volume change reported"
        );
        self.notify();
    }
}

impl<M: MediaHandle> Drop for AlbumController<M> {
    fn drop(&mut self) {
        self.subscribers.clear();
        self.media.release();
    }
}

/// A usable length in seconds: finite and not negative.
fn known_seconds(seconds: f64) -> Option<f64> {
    Some(seconds).filter(|s| s.is_finite() && *s >= 0.0)
}

fn volume_to_gain(level: u8) -> f32 {
    f32::from(level) / f32::from(MAX_VOLUME)
}
