//! Album view-controller: playback state for one album and the operations
//! the track list and player bar trigger.

mod controller;
mod format;
mod snapshot;

pub use controller::*;
pub use format::format_duration;
pub use snapshot::PlaybackSnapshot;
