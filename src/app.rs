//! Application module: the track-list cursor used by the TUI and runtime.
//!
//! Playback state itself lives in `album::AlbumController`; `App` only holds
//! what the view adds on top of it.

mod model;

pub use model::*;
