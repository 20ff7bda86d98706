use std::time::{Duration, Instant};

/// Wall-clock playback position: time accumulated while paused plus the
/// running stretch since the last resume.
#[derive(Debug, Default)]
pub(crate) struct PlayClock {
    started_at: Option<Instant>,
    accumulated: Duration,
}

impl PlayClock {
    pub(crate) fn reset(&mut self) {
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    pub(crate) fn resume(&mut self) {
        if self.started_at.is_none() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(crate) fn pause(&mut self) {
        if let Some(st) = self.started_at.take() {
            self.accumulated += st.elapsed();
        }
    }

    /// Jump to `pos`, keeping the running/paused state.
    pub(crate) fn set(&mut self, pos: Duration) {
        self.accumulated = pos;
        if self.started_at.is_some() {
            self.started_at = Some(Instant::now());
        }
    }

    pub(crate) fn is_running(&self) -> bool {
        self.started_at.is_some()
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.accumulated + self.started_at.map_or(Duration::ZERO, |st| st.elapsed())
    }
}
