//! Core types for cache operations

mod config;
mod entry;
mod freshness;

pub use config::CacheConfig;
pub use entry::{Expiry, SharedPromise, SlotEntry, rejected_promise, resolved_promise};
pub use freshness::Freshness;
