use std::sync::Arc;

use crate::config::PricingConfig;
use crate::metrics::{Metrics, TransitionOutcome};

use super::aggregate::Order;
use super::calculator::{ThresholdCalculator, TotalCalculator};
use super::errors::OrderError;
use super::repository::OrderRepository;
use super::value_objects::OrderStatus;

// ============================================================================
// Order Service
// ============================================================================
//
// Orchestrates: lookup → transition check → repository write
//
// The transition table lives in `transition` and nowhere else. A rejected
// transition never reaches the repository.
//
// ============================================================================

pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    calculator: Arc<dyn TotalCalculator>,
    pricing: PricingConfig,
    metrics: Option<Arc<Metrics>>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>, calculator: Arc<dyn TotalCalculator>) -> Self {
        Self {
            repository,
            calculator,
            pricing: PricingConfig::default(),
            metrics: None,
        }
    }

    /// Service backed by the threshold calculator configured from `pricing`.
    pub fn with_pricing(repository: Arc<dyn OrderRepository>, pricing: PricingConfig) -> Self {
        let calculator = Arc::new(ThresholdCalculator::new(pricing.discount_stage));
        Self {
            pricing,
            ..Self::new(repository, calculator)
        }
    }

    pub fn with_metrics(mut self, metrics: Arc<Metrics>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    pub fn create_order(
        &self,
        order_id: &str,
        item_price: f64,
        item_count: i32,
        tax_rate: f64,
    ) -> Result<Order, OrderError> {
        if self.repository.exists(order_id)? {
            tracing::warn!(order_id = %order_id, "Rejected duplicate order");
            return Err(OrderError::AlreadyExists(order_id.to_string()));
        }

        let total = self.calculator.calculate_total(
            item_price,
            item_count,
            tax_rate,
            self.pricing.discount,
            self.pricing.discount_threshold,
        )?;

        let order = Order::new(order_id, total);
        self.repository.save(&order)?;

        if let Some(metrics) = &self.metrics {
            metrics.orders_created.inc();
        }
        tracing::info!(order_id = %order_id, amount = total, "Order created");

        Ok(order)
    }

    pub fn confirm_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.change_status(order_id, OrderStatus::Confirmed)
    }

    pub fn cancel_order(&self, order_id: &str) -> Result<Order, OrderError> {
        self.change_status(order_id, OrderStatus::Cancelled)
    }

    /// Apply the transition table to `order`.
    ///
    /// Only `Created` may move, and only to `Confirmed` or `Cancelled`.
    /// Re-confirming or re-cancelling is rejected like any other move out of
    /// a terminal state.
    pub fn transition(order: &Order, target: OrderStatus) -> Result<Order, OrderError> {
        let from = order.status();
        if from.is_terminal() || !target.is_terminal() {
            return Err(OrderError::InvalidTransition { from, to: target });
        }

        Ok(order.with_status(target))
    }

    fn change_status(&self, order_id: &str, target: OrderStatus) -> Result<Order, OrderError> {
        let order = self
            .repository
            .find_by_id(order_id)?
            .ok_or_else(|| OrderError::NotFound(order_id.to_string()))?;

        let updated = match Self::transition(&order, target) {
            Ok(updated) => updated,
            Err(err) => {
                tracing::warn!(
                    order_id = %order_id,
                    from = %order.status(),
                    to = %target,
                    "Rejected status transition"
                );
                self.record_transition(target, TransitionOutcome::Rejected);
                return Err(err);
            }
        };

        if let Err(err) = self.repository.update(&updated) {
            tracing::warn!(order_id = %order_id, error = %err, "Failed to persist status change");
            self.record_transition(target, TransitionOutcome::Failed);
            return Err(err.into());
        }
        self.record_transition(target, TransitionOutcome::Accepted);
        tracing::info!(order_id = %order_id, status = %target, "Order status changed");

        Ok(updated)
    }

    fn record_transition(&self, target: OrderStatus, outcome: TransitionOutcome) {
        if let Some(metrics) = &self.metrics {
            metrics.record_transition(target.as_str(), outcome);
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
