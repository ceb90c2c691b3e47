//! Playlist state and the transport operations that drive it.
//!
//! `PlaylistState` owns the three persisted values; `Transport` is the only
//! code that mutates them.

mod index;
mod state;
mod transport;

pub use index::*;
pub use state::*;
pub use transport::Transport;
