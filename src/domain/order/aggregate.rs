use serde::{Deserialize, Serialize};

use super::value_objects::OrderStatus;

// ============================================================================
// Order - Immutable Domain Value
// ============================================================================
//
// An order never changes in place. Status changes go through
// `OrderService::transition`, which returns a new value or an error.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    order_id: String,
    amount: f64,
    status: OrderStatus,
}

impl Order {
    /// A freshly created order, always in `Created`.
    pub fn new(order_id: impl Into<String>, amount: f64) -> Self {
        Self::restore(order_id, amount, OrderStatus::Created)
    }

    /// Rehydrate a stored order in whatever state it was persisted.
    ///
    /// `amount` must be non-negative. Totals from `TotalCalculator` always
    /// are; other callers are checked in debug builds only.
    pub fn restore(order_id: impl Into<String>, amount: f64, status: OrderStatus) -> Self {
        debug_assert!(amount >= 0.0, "order amount must be non-negative, got {amount}");
        Self {
            order_id: order_id.into(),
            amount,
            status,
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub(crate) fn with_status(&self, status: OrderStatus) -> Self {
        Self {
            status,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_order_starts_created() {
        let order = Order::new("order1", 100.0);

        assert_eq!(order.order_id(), "order1");
        assert_eq!(order.amount(), 100.0);
        assert_eq!(order.status(), OrderStatus::Created);
    }

    #[test]
    fn test_with_status_leaves_original_untouched() {
        let order = Order::new("order1", 100.0);
        let confirmed = order.with_status(OrderStatus::Confirmed);

        assert_eq!(order.status(), OrderStatus::Created);
        assert_eq!(confirmed.status(), OrderStatus::Confirmed);
        assert_eq!(confirmed.order_id(), order.order_id());
        assert_eq!(confirmed.amount(), order.amount());
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "order amount must be non-negative")]
    fn test_negative_amount_is_refused() {
        Order::new("order1", -1.0);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "order amount must be non-negative")]
    fn test_nan_amount_is_refused() {
        Order::restore("order1", f64::NAN, OrderStatus::Created);
    }

    #[test]
    fn test_zero_amount_is_accepted() {
        assert_eq!(Order::new("free", 0.0).amount(), 0.0);
    }

    #[test]
    fn test_order_serialization() {
        let order = Order::restore("42", 19.0, OrderStatus::Cancelled);

        let json = serde_json::to_string(&order).unwrap();
        let deserialized: Order = serde_json::from_str(&json).unwrap();

        assert_eq!(order, deserialized);
    }
}
