use std::fmt;

use serde::{Deserialize, Serialize};

// ============================================================================
// Order Value Objects
// ============================================================================

/// Lifecycle status of an order.
///
/// `Created` is the initial state; `Confirmed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    Created,
    Confirmed,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, OrderStatus::Created)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where the threshold-gated discount is subtracted relative to tax.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountStage {
    /// Subtract the discount from the subtotal, then apply tax.
    #[default]
    BeforeTax,
    /// Apply tax to the subtotal, then subtract the discount.
    AfterTax,
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_equality() {
        assert_eq!(OrderStatus::Created, OrderStatus::Created);
        assert_ne!(OrderStatus::Created, OrderStatus::Confirmed);
        assert_ne!(OrderStatus::Confirmed, OrderStatus::Cancelled);
    }

    #[test]
    fn test_only_created_is_non_terminal() {
        assert!(!OrderStatus::Created.is_terminal());
        assert!(OrderStatus::Confirmed.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }

    #[test]
    fn test_order_status_serialization() {
        let json = serde_json::to_string(&OrderStatus::Cancelled).unwrap();
        assert_eq!(json, "\"Cancelled\"");

        let deserialized: OrderStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, OrderStatus::Cancelled);
    }

    #[test]
    fn test_discount_stage_defaults_to_before_tax() {
        assert_eq!(DiscountStage::default(), DiscountStage::BeforeTax);

        let stage: DiscountStage = serde_json::from_str("\"after_tax\"").unwrap();
        assert_eq!(stage, DiscountStage::AfterTax);
    }
}
