//! Key-value store implementations.
//!
//! - [`MemoryStore`] - in-process map, contents lost on exit
//! - [`FileStore`] - one JSON file per key under a data directory

pub mod file_store;
pub mod memory_store;

pub use file_store::FileStore;
pub use memory_store::MemoryStore;
