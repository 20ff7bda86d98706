//! Media playback handle.
//!
//! `MediaHandle` is the seam the album controller drives; `RodioMedia` is the
//! real implementation, running rodio on its own thread.

mod clock;
mod handle;
mod player;
mod sink;
mod thread;
mod types;

#[cfg(test)]
pub mod fake;

pub use handle::MediaHandle;
pub use player::RodioMedia;
pub use types::MediaEvent;
