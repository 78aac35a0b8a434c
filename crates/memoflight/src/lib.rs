//! memoflight: wrap an async producer function with a deduplicating,
//! freshness-aware cache
//!
//! # Features
//!
//! - **Concurrent dedup**: callers issued while an entry is pending or
//!   fresh share one producer invocation and one shared promise
//! - **Two-level keys**: a resolver maps call arguments to a `(group,
//!   key)` tuple; one live entry per group, key changes invalidate it
//! - **Freshness controls**: per-function TTL, `must_revalidate`, manual
//!   `set`/`delete`, force `reload`, `is_fresh`/`is_settled` inspection
//! - **Race-safe settlement**: an in-flight reload that loses to a later
//!   reload, delete, or clear never overwrites the newer state
//! - **Pluggable storage**: any [`SlotStore`] implementation can back a
//!   wrapped function
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use memoflight::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let cache = AsyncCache::new(MemoryStore::new(), |id: u64| async move {
//!         Ok::<_, CacheError>(format!("user-{id}"))
//!     })
//!     .with_config(CacheConfig::new().ttl_secs(60))
//!     .with_resolver(|id: &u64| ("users", *id));
//!
//!     // Concurrent callers with the same key share one invocation.
//!     let (a, b) = tokio::join!(cache.call(1), cache.call(1));
//!     assert_eq!(a?, b?);
//!
//!     assert!(cache.is_fresh(&1));
//!     assert_eq!(cache.get(&1), Some("user-1".to_string()));
//!     Ok(())
//! }
//! ```

mod cache;

// Re-export core
pub use memoflight_core::*;

// Re-export storage
#[cfg(feature = "memory")]
pub use memoflight_storage::{MemoryProvider, MemoryStore, StoreStats};

// Export facade
pub use cache::{AsyncCache, CacheContext, CacheFactory, CacheHandle};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{
        AsyncCache, CacheConfig, CacheContext, CacheError, CacheFactory, CacheHandle, Freshness,
        ResolvedKey, Result,
    };

    #[cfg(feature = "memory")]
    pub use crate::{MemoryProvider, MemoryStore};
}
