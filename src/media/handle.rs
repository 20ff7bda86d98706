use std::path::Path;

use super::types::MediaEvent;

/// A single playback primitive: one source at a time, transport controls, and
/// change notifications.
///
/// Times are seconds as `f64`. An unknown duration reads as `NaN`. Volume is
/// 0.0 to 1.0.
pub trait MediaHandle {
    /// Load `src`, resetting position to zero. Playback does not start.
    fn set_source(&mut self, src: &Path);
    fn play(&mut self);
    fn pause(&mut self);
    fn set_position(&mut self, seconds: f64);
    fn set_volume(&mut self, volume: f32);

    fn position(&self) -> f64;
    fn duration(&self) -> f64;
    /// Current output volume as the backend sees it.
    fn volume(&self) -> f32;

    /// Take the notifications emitted since the last call.
    fn poll_events(&mut self) -> Vec<MediaEvent>;

    /// Clear the source and stop delivering notifications. Calling it twice
    /// is harmless.
    fn release(&mut self);
}
