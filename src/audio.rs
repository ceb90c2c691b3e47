//! Audio output: the media handle the transport drives.
//!
//! `AudioPlayer` owns a dedicated thread holding the rodio output stream.
//! Commands go in over a channel; `MediaEvent`s come back over another.

mod player;
mod sink;
mod thread;
mod types;

pub use player::AudioPlayer;
pub use types::*;

#[cfg(test)]
mod tests;
