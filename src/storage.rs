//! Key-value storage and the persisted value container built on top of it.
//!
//! Every persisted value owns one key. Values are stored as JSON strings so
//! any backend that can map strings to strings works.

mod backend;
mod file;
mod memory;
mod persisted;

pub use backend::*;
pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use persisted::Persisted;
