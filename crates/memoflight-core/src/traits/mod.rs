//! Core traits for cache operations

mod metrics;
mod producer;
mod resolver;
mod store;
mod tracing;

pub use metrics::{CacheMetrics, NoopMetrics};
pub use producer::Producer;
pub use resolver::{KeyResolver, ResolveKey, ResolvedKey, singleton_resolver};
pub use store::{SlotStore, StoreProvider};
pub use tracing::TracingMetrics;

#[cfg(feature = "metrics")]
pub use metrics::MetricsCrateAdapter;
