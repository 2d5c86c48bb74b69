//! Activity record storage.

pub mod memory;

pub use memory::MemoryStore;
