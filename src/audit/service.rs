use std::fmt::Write as _;
use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::config::{AuditConfig, DEFAULT_TIMESTAMP_FORMAT};
use crate::domain::order::{Order, OrderRepository, OrderStatus};
use crate::metrics::Metrics;

use super::clock::{Clock, SystemClock};
use super::entry::{self, AuditEntry};

pub const UPDATED: &str = "UPDATED";
pub const UPDATED_FAILED: &str = "UPDATED_FAILED";

// ============================================================================
// Eligibility
// ============================================================================

/// Decides whether an order takes part in a batch update.
#[cfg_attr(test, mockall::automock)]
pub trait EligibilityPolicy {
    fn should_process(&self, order: &Order) -> bool;
}

/// Orders that are not cancelled and carry a positive amount.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardEligibility;

impl EligibilityPolicy for StandardEligibility {
    fn should_process(&self, order: &Order) -> bool {
        order.status() != OrderStatus::Cancelled && order.amount() > 0.0
    }
}

impl<F> EligibilityPolicy for F
where
    F: Fn(&Order) -> bool,
{
    fn should_process(&self, order: &Order) -> bool {
        self(order)
    }
}

// ============================================================================
// Order Audit Service
// ============================================================================
//
// Keeps an append-only, in-memory audit trail and wraps batch repository
// updates with it. One order's storage failure is recorded and the batch
// moves on.
//
// ============================================================================

pub struct OrderAuditService {
    audit_logs: Vec<String>,
    repository: Arc<dyn OrderRepository>,
    clock: Box<dyn Clock>,
    policy: Box<dyn EligibilityPolicy>,
    config: AuditConfig,
    metrics: Option<Arc<Metrics>>,
}

impl OrderAuditService {
    pub fn new(repository: Arc<dyn OrderRepository>) -> Self {
        Self {
            audit_logs: Vec::new(),
            repository,
            clock: Box::new(SystemClock),
            policy: Box::new(StandardEligibility),
            config: AuditConfig::default(),
            metrics: None,
        }
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_policy(mut self, policy: impl EligibilityPolicy + 'static) -> Self {
        self.policy = Box::new(policy);
        self
    }

    /// Use `config`, unless its timestamp format can't be read back by
    /// pruning, in which case the default format is kept.
    pub fn with_config(mut self, config: AuditConfig) -> Self {
        match config.validate() {
            Ok(()) => self.config = config,
            Err(err) => {
                tracing::warn!(error = %err, "Rejected audit config, using default timestamp format");
                self.config = AuditConfig::default();
            }
        }
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Append an entry stamped with the clock's current time.
    pub fn record_audit(&mut self, action: &str, order_id: &str) {
        let entry = AuditEntry::new(self.formatted_timestamp(), order_id, action);
        tracing::debug!(order_id = %order_id, action = %action, "Recorded audit entry");
        self.audit_logs.push(entry.to_string());
    }

    /// Update every eligible order, one at a time, in input order.
    pub fn process_order_update(&mut self, orders: &[Order]) {
        for order in orders {
            if !self.should_process_order(order) {
                tracing::debug!(order_id = %order.order_id(), "Skipping ineligible order");
                continue;
            }

            match self.repository.update(order) {
                Ok(()) => {
                    self.record_audit(UPDATED, order.order_id());
                    self.record_update_outcome(true);
                }
                Err(err) => {
                    tracing::warn!(
                        order_id = %order.order_id(),
                        error = %err,
                        "Order update failed, continuing batch"
                    );
                    self.record_audit(UPDATED_FAILED, order.order_id());
                    self.record_update_outcome(false);
                }
            }
        }
    }

    pub fn should_process_order(&self, order: &Order) -> bool {
        self.policy.should_process(order)
    }

    /// Snapshot of the log; later writes are not visible through it.
    pub fn get_audit_logs(&self) -> Vec<String> {
        self.audit_logs.clone()
    }

    /// Remove entries stamped strictly before `cutoff`.
    ///
    /// Entries whose timestamp can't be parsed are kept.
    pub fn clear_old_entries(&mut self, cutoff: NaiveDateTime) -> usize {
        let format = self.config.timestamp_format.clone();
        self.clear_entries_where(|line| entry::is_entry_older_than(line, cutoff, &format))
    }

    /// Remove every entry matching `predicate`; returns how many went.
    pub fn clear_entries_where<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&str) -> bool,
    {
        let initial = self.audit_logs.len();
        self.audit_logs.retain(|line| !predicate(line));
        let removed = initial - self.audit_logs.len();

        if let Some(metrics) = &self.metrics {
            metrics.audit_entries_pruned.inc_by(removed as u64);
        }
        tracing::info!(removed = removed, remaining = self.audit_logs.len(), "Pruned audit log");

        removed
    }

    pub fn is_entry_older_than(&self, line: &str, cutoff: NaiveDateTime) -> bool {
        entry::is_entry_older_than(line, cutoff, &self.config.timestamp_format)
    }

    fn formatted_timestamp(&self) -> String {
        let now = self.clock.now();
        let mut timestamp = String::new();

        if write!(timestamp, "{}", now.format(&self.config.timestamp_format)).is_err() {
            tracing::warn!(
                format = %self.config.timestamp_format,
                "Invalid audit timestamp format, using default"
            );
            return now.format(DEFAULT_TIMESTAMP_FORMAT).to_string();
        }

        timestamp
    }

    fn record_update_outcome(&self, success: bool) {
        if let Some(metrics) = &self.metrics {
            metrics.record_audit_update(success);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
