//! Metrics trait for cache observability

/// Trait for cache metrics/observability
///
/// Implement this to integrate with your metrics system; the engine records
/// one event per lifecycle transition. Groups are used as labels, not
/// high-cardinality keys; pick resolvers accordingly if you enable an
/// exporting adapter.
pub trait CacheMetrics: Send + Sync + 'static {
    /// An existing promise was served (pending or fresh)
    fn record_hit(&self, group: &str);

    /// No usable entry existed for the resolved key tuple
    fn record_miss(&self, group: &str);

    /// A settled entry existed but was expired
    fn record_stale(&self, group: &str);

    /// A producer invocation was issued
    fn record_reload(&self, group: &str);

    /// A settlement was recorded for the group's current entry
    fn record_settlement(&self, group: &str, success: bool);

    /// A settlement lost the race to a superseding operation and was
    /// discarded
    fn record_discarded(&self, group: &str);
}

/// No-op metrics implementation (default)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMetrics;

impl CacheMetrics for NoopMetrics {
    #[inline]
    fn record_hit(&self, _group: &str) {}

    #[inline]
    fn record_miss(&self, _group: &str) {}

    #[inline]
    fn record_stale(&self, _group: &str) {}

    #[inline]
    fn record_reload(&self, _group: &str) {}

    #[inline]
    fn record_settlement(&self, _group: &str, _success: bool) {}

    #[inline]
    fn record_discarded(&self, _group: &str) {}
}

/// Metrics adapter using the `metrics` crate
///
/// Integrates with Prometheus, StatsD, and other exporters via the
/// `metrics` ecosystem.
///
/// # Example
/// ```ignore
/// use memoflight_core::MetricsCrateAdapter;
///
/// let metrics = MetricsCrateAdapter::new("memoflight");
/// // Emits: memoflight_hits_total, memoflight_misses_total, etc.
/// ```
#[cfg(feature = "metrics")]
#[derive(Debug, Clone)]
pub struct MetricsCrateAdapter {
    prefix: String,
}

#[cfg(feature = "metrics")]
impl MetricsCrateAdapter {
    /// Create a new adapter with the given metric name prefix
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    fn metric_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }
}

#[cfg(feature = "metrics")]
impl CacheMetrics for MetricsCrateAdapter {
    fn record_hit(&self, group: &str) {
        metrics::counter!(self.metric_name("hits_total"), "group" => group.to_string()).increment(1);
    }

    fn record_miss(&self, group: &str) {
        metrics::counter!(self.metric_name("misses_total"), "group" => group.to_string())
            .increment(1);
    }

    fn record_stale(&self, group: &str) {
        metrics::counter!(self.metric_name("stale_total"), "group" => group.to_string())
            .increment(1);
    }

    fn record_reload(&self, group: &str) {
        metrics::counter!(self.metric_name("reloads_total"), "group" => group.to_string())
            .increment(1);
    }

    fn record_settlement(&self, group: &str, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        metrics::counter!(
            self.metric_name("settlements_total"),
            "group" => group.to_string(),
            "outcome" => outcome
        )
        .increment(1);
    }

    fn record_discarded(&self, group: &str) {
        metrics::counter!(self.metric_name("discarded_total"), "group" => group.to_string())
            .increment(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_metrics() {
        let metrics = NoopMetrics;
        // Just verify these don't panic
        metrics.record_hit("g");
        metrics.record_miss("g");
        metrics.record_reload("g");
        metrics.record_settlement("g", true);
        metrics.record_discarded("g");
    }
}
