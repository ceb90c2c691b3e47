//! Settings for storage, file discovery, playback, the UI and logging.
//!
//! Values come from struct defaults, then `config.toml`, then `REEL__*`
//! environment variables. See `Settings` for the file location.

mod load;
mod schema;

pub use schema::*;
