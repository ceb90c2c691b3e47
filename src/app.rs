//! Application module: the presentation-side model used by the TUI and runtime.
//!
//! The `App` model lives in `app::model` and holds the cursor, the input
//! prompt and the last observed playback state. Playlist data itself lives
//! in `playlist::Transport`.

mod model;

pub use model::*;
