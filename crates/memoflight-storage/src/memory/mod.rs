//! In-memory slot store

mod store;

pub use store::{MemoryProvider, MemoryStore, StoreStats};
