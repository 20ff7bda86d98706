//! Settings for the player.
//!
//! `Settings::load` layers environment variables over an optional TOML file
//! over the struct defaults in `schema`.

mod load;
mod schema;

pub use schema::*;
