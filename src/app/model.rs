//! View-side state for the track list: which row the cursor is on and
//! whether it follows the song being played.

/// Cursor over the album's track rows.
#[derive(Debug)]
pub struct App {
    pub track_count: usize,
    pub selected: usize,
    pub follow_playback: bool,
}

impl App {
    /// Create an `App` for an album with `track_count` songs.
    pub fn new(track_count: usize) -> Self {
        Self {
            track_count,
            selected: 0,
            follow_playback: true,
        }
    }

    /// Enable following playback (cursor follows the current song).
    pub fn follow_playback_on(&mut self) {
        self.follow_playback = true;
    }

    /// Disable following playback; the cursor roams freely.
    pub fn follow_playback_off(&mut self) {
        self.follow_playback = false;
    }

    /// Move the cursor onto the playing track when following is on.
    pub fn sync_to_playing(&mut self, playing_index: usize) {
        if self.follow_playback && self.selected != playing_index {
            self.set_selected(playing_index);
        }
    }

    /// Set the selected row, clamped to the track list.
    pub fn set_selected(&mut self, idx: usize) {
        self.selected = idx.min(self.track_count.saturating_sub(1));
    }

    /// Move selection down one row; stops at the last row.
    pub fn next(&mut self) {
        self.set_selected(self.selected + 1);
    }

    /// Move selection up one row; stops at the first row.
    pub fn prev(&mut self) {
        self.set_selected(self.selected.saturating_sub(1));
    }

    pub fn top(&mut self) {
        self.set_selected(0);
    }

    pub fn bottom(&mut self) {
        self.set_selected(self.track_count.saturating_sub(1));
    }
}
