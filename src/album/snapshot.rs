/// What the view needs to draw the player: a copy of the controller's state
/// at one instant.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub playing: bool,
    /// Index of the current song in the album.
    pub track: usize,
    pub song_title: String,
    /// Seconds.
    pub position: f64,
    /// Seconds; `NaN` while unknown.
    pub duration: f64,
    /// 0 to 100.
    pub volume: u8,
}

impl PlaybackSnapshot {
    /// Position as a fraction of the duration, or `None` while the duration
    /// is unknown.
    pub fn progress(&self) -> Option<f64> {
        if self.duration.is_finite() && self.duration > 0.0 {
            Some((self.position / self.duration).clamp(0.0, 1.0))
        } else {
            None
        }
    }
}
