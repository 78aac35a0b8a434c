use tracing::debug;

use crate::traits::metrics::CacheMetrics;

/// Metrics adapter that logs lifecycle events via `tracing`
#[derive(Debug, Clone, Default)]
pub struct TracingMetrics {
    /// Service name/prefix (optional)
    service_name: Option<String>,
}

impl TracingMetrics {
    /// Create new tracing metrics adapter
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with service name prefix
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = Some(name.into());
        self
    }
}

impl CacheMetrics for TracingMetrics {
    fn record_hit(&self, group: &str) {
        debug!(
            target: "memoflight",
            event = "hit",
            group = %group,
            service = ?self.service_name,
            "Cache Hit"
        );
    }

    fn record_miss(&self, group: &str) {
        debug!(
            target: "memoflight",
            event = "miss",
            group = %group,
            service = ?self.service_name,
            "Cache Miss"
        );
    }

    fn record_stale(&self, group: &str) {
        debug!(
            target: "memoflight",
            event = "stale",
            group = %group,
            service = ?self.service_name,
            "Cache Stale"
        );
    }

    fn record_reload(&self, group: &str) {
        debug!(
            target: "memoflight",
            event = "reload",
            group = %group,
            service = ?self.service_name,
            "Producer Reload"
        );
    }

    fn record_settlement(&self, group: &str, success: bool) {
        debug!(
            target: "memoflight",
            event = "settlement",
            group = %group,
            success = success,
            service = ?self.service_name,
            "Entry Settled"
        );
    }

    fn record_discarded(&self, group: &str) {
        debug!(
            target: "memoflight",
            event = "discarded",
            group = %group,
            service = ?self.service_name,
            "Settlement Discarded"
        );
    }
}
