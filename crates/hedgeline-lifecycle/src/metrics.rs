//! Prometheus metrics for the orchestrator

use prometheus::{IntCounter, IntCounterVec, Opts, Registry};

/// Lifecycle counters
pub struct LifecycleMetrics {
    pub policies_created: IntCounter,
    pub premium_rejections: IntCounter,
    pub liquidity_rejections: IntCounter,
    /// Labelled by collaborator name
    pub collaborator_failures: IntCounterVec,
    /// Labelled by settlement outcome
    pub settlements: IntCounterVec,
}

impl LifecycleMetrics {
    pub fn new(prefix: &str) -> prometheus::Result<Self> {
        Ok(Self {
            policies_created: IntCounter::new(
                format!("{}_policies_created_total", prefix),
                "Policies committed to the Active state",
            )?,
            premium_rejections: IntCounter::new(
                format!("{}_premium_rejections_total", prefix),
                "Creation requests rejected for an out-of-bounds premium",
            )?,
            liquidity_rejections: IntCounter::new(
                format!("{}_liquidity_rejections_total", prefix),
                "Creation requests rejected for insufficient liquidity",
            )?,
            collaborator_failures: IntCounterVec::new(
                Opts::new(
                    format!("{}_collaborator_failures_total", prefix),
                    "Failed or timed out collaborator calls",
                ),
                &["collaborator"],
            )?,
            settlements: IntCounterVec::new(
                Opts::new(
                    format!("{}_settlements_total", prefix),
                    "Policies settled",
                ),
                &["outcome"],
            )?,
        })
    }

    pub fn register(&self, registry: &Registry) -> prometheus::Result<()> {
        registry.register(Box::new(self.policies_created.clone()))?;
        registry.register(Box::new(self.premium_rejections.clone()))?;
        registry.register(Box::new(self.liquidity_rejections.clone()))?;
        registry.register(Box::new(self.collaborator_failures.clone()))?;
        registry.register(Box::new(self.settlements.clone()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register() {
        let metrics = LifecycleMetrics::new("hedgeline_test").unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();

        metrics.policies_created.inc();
        metrics.settlements.with_label_values(&["exercised"]).inc();
        metrics
            .collaborator_failures
            .with_label_values(&["oracle"])
            .inc();

        let families = registry.gather();
        assert_eq!(families.len(), 5);
        assert!(families
            .iter()
            .any(|f| f.get_name() == "hedgeline_test_policies_created_total"));
    }

    #[test]
    fn test_register_twice_fails() {
        let metrics = LifecycleMetrics::new("hedgeline_dup").unwrap();
        let registry = Registry::new();
        metrics.register(&registry).unwrap();
        assert!(metrics.register(&registry).is_err());
    }
}
