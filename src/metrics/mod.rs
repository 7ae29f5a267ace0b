use prometheus::{Encoder, IntCounter, IntCounterVec, Opts, Registry, TextEncoder};

// ============================================================================
// Metrics Module - Prometheus counters for the order lifecycle
// ============================================================================
//
// Tracks:
// - Orders created
// - Status transitions: accepted, rejected or failed on write
// - Batch audit updates and their outcome
// - Audit entries pruned
//
// The registry is owned here; `render` produces the text exposition format.
// ============================================================================

/// How a status transition attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionOutcome {
    /// Allowed and persisted
    Accepted,
    /// Refused by the transition table
    Rejected,
    /// Allowed, but the repository write failed
    Failed,
}

impl TransitionOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransitionOutcome::Accepted => "accepted",
            TransitionOutcome::Rejected => "rejected",
            TransitionOutcome::Failed => "failed",
        }
    }
}

pub struct Metrics {
    registry: Registry,

    pub orders_created: IntCounter,
    pub order_transitions: IntCounterVec,
    pub audit_updates: IntCounterVec,
    pub audit_entries_pruned: IntCounter,
}

impl Metrics {
    pub fn new() -> anyhow::Result<Self> {
        let registry = Registry::new();

        let orders_created = IntCounter::new("orders_created_total", "Total orders created")?;
        registry.register(Box::new(orders_created.clone()))?;

        let order_transitions = IntCounterVec::new(
            Opts::new("order_transitions_total", "Order status transitions by target and outcome"),
            &["target", "outcome"],
        )?;
        registry.register(Box::new(order_transitions.clone()))?;

        let audit_updates = IntCounterVec::new(
            Opts::new("audit_updates_total", "Batch audit repository updates by outcome"),
            &["outcome"],
        )?;
        registry.register(Box::new(audit_updates.clone()))?;

        let audit_entries_pruned = IntCounter::new(
            "audit_entries_pruned_total",
            "Total audit entries removed by pruning",
        )?;
        registry.register(Box::new(audit_entries_pruned.clone()))?;

        Ok(Self {
            registry,
            orders_created,
            order_transitions,
            audit_updates,
            audit_entries_pruned,
        })
    }

    /// Helper to record a status transition attempt
    pub fn record_transition(&self, target: &str, outcome: TransitionOutcome) {
        self.order_transitions
            .with_label_values(&[target, outcome.as_str()])
            .inc();
    }

    /// Helper to record one batch audit update
    pub fn record_audit_update(&self, success: bool) {
        let outcome = if success { "success" } else { "failure" };
        self.audit_updates.with_label_values(&[outcome]).inc();
    }

    /// Render every registered metric in the Prometheus text format
    pub fn render(&self) -> anyhow::Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new().unwrap();
        metrics.orders_created.inc();

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains("orders_created_total 1"));
    }

    #[test]
    fn test_record_transition() {
        let metrics = Metrics::new().unwrap();
        metrics.record_transition("confirmed", TransitionOutcome::Accepted);
        metrics.record_transition("cancelled", TransitionOutcome::Rejected);
        metrics.record_transition("cancelled", TransitionOutcome::Rejected);
        metrics.record_transition("cancelled", TransitionOutcome::Failed);

        assert_eq!(
            metrics.order_transitions.with_label_values(&["confirmed", "accepted"]).get(),
            1
        );
        assert_eq!(
            metrics.order_transitions.with_label_values(&["cancelled", "rejected"]).get(),
            2
        );
        assert_eq!(
            metrics.order_transitions.with_label_values(&["cancelled", "failed"]).get(),
            1
        );
    }

    #[test]
    fn test_record_audit_update() {
        let metrics = Metrics::new().unwrap();
        metrics.record_audit_update(true);
        metrics.record_audit_update(false);

        let rendered = metrics.render().unwrap();
        assert!(rendered.contains("audit_updates_total{outcome=\"success\"} 1"));
        assert!(rendered.contains("audit_updates_total{outcome=\"failure\"} 1"));
    }
}
