//! Recording `MediaHandle` for tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::handle::MediaHandle;
use super::types::MediaEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    SetSource(PathBuf),
    Play,
    Pause,
    SetPosition(f64),
    SetVolume(f32),
    Release,
}

#[derive(Debug)]
pub struct FakeState {
    pub calls: Vec<Call>,
    pub source: Option<PathBuf>,
    pub position: f64,
    pub duration: f64,
    pub volume: f32,
    pub playing: bool,
    pub pending: Vec<MediaEvent>,
    pub released: bool,
}

/// Clones share state, so a test can keep one clone while the controller
/// owns another.
#[derive(Debug, Clone)]
pub struct FakeMedia {
    state: Rc<RefCell<FakeState>>,
}

impl FakeMedia {
    pub fn new() -> Self {
        Self {
            state: Rc::new(RefCell::new(FakeState {
                calls: Vec::new(),
                source: None,
                position: 0.0,
                duration: f64::NAN,
                volume: 1.0,
                playing: false,
                pending: Vec::new(),
                released: false,
            })),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.borrow_mut().calls.clear();
    }

    pub fn source(&self) -> Option<PathBuf> {
        self.state.borrow().source.clone()
    }

    pub fn is_playing(&self) -> bool {
        self.state.borrow().playing
    }

    pub fn is_released(&self) -> bool {
        self.state.borrow().released
    }

    /// Pretend the source finished loading with `seconds` of audio.
    pub fn finish_loading(&self, seconds: f64) {
        let mut s = self.state.borrow_mut();
        s.duration = seconds;
        s.pending.push(MediaEvent::DurationChange);
    }

    /// Pretend playback advanced to `seconds`.
    pub fn advance_to(&self, seconds: f64) {
        let mut s = self.state.borrow_mut();
        s.position = seconds;
        s.pending.push(MediaEvent::TimeUpdate);
    }

    /// Pretend something outside the controller changed the output volume.
    pub fn external_volume(&self, volume: f32) {
        let mut s = self.state.borrow_mut();
        s.volume = volume;
        s.pending.push(MediaEvent::VolumeChange);
    }
}

impl MediaHandle for FakeMedia {
    fn set_source(&mut self, src: &Path) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::SetSource(src.to_path_buf()));
        s.source = Some(src.to_path_buf());
        s.position = 0.0;
        s.duration = f64::NAN;
        s.playing = false;
    }

    fn play(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Play);
        s.playing = true;
    }

    fn pause(&mut self) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::Pause);
        s.playing = false;
    }

    fn set_position(&mut self, seconds: f64) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::SetPosition(seconds));
        s.position = seconds;
    }

    fn set_volume(&mut self, volume: f32) {
        let mut s = self.state.borrow_mut();
        s.calls.push(Call::SetVolume(volume));
        s.volume = volume;
    }

    fn position(&self) -> f64 {
        self.state.borrow().position
    }

    fn duration(&self) -> f64 {
        self.state.borrow().duration
    }

    fn volume(&self) -> f32 {
        self.state.borrow().volume
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        let mut s = self.state.borrow_mut();
        if s.released {
            s.pending.clear();
            return Vec::new();
        }
        std::mem::take(&mut s.pending)
    }

    fn release(&mut self) {
        let mut s = self.state.borrow_mut();
        if s.released {
            return;
        }
        s.calls.push(Call::Release);
        s.released = true;
        s.source = None;
        s.pending.clear();
    }
}
