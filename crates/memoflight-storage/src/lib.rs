//! memoflight-storage: Storage collaborators for memoflight

#[cfg(feature = "memory")]
pub mod memory;

#[cfg(feature = "memory")]
pub use memory::{MemoryProvider, MemoryStore, StoreStats};
