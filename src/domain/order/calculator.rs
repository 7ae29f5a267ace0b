use super::errors::OrderError;
use super::value_objects::DiscountStage;

// ============================================================================
// Total Calculation
// ============================================================================
//
// total = round((price * count) gated-discount, taxed), clamped at zero.
//
// The discount is subtracted only when the pre-tax subtotal is strictly above
// the threshold. `DiscountStage` decides whether it comes off before or after
// tax. Amounts are plain f64; no currency precision is promised.
//
// ============================================================================

/// Computes the payable total for a single line of an order.
#[cfg_attr(test, mockall::automock)]
pub trait TotalCalculator {
    fn calculate_total(
        &self,
        item_price: f64,
        count: i32,
        tax_rate: f64,
        discount: f64,
        discount_threshold: f64,
    ) -> Result<f64, OrderError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ThresholdCalculator {
    stage: DiscountStage,
}

impl ThresholdCalculator {
    pub fn new(stage: DiscountStage) -> Self {
        Self { stage }
    }
}

impl TotalCalculator for ThresholdCalculator {
    fn calculate_total(
        &self,
        item_price: f64,
        count: i32,
        tax_rate: f64,
        discount: f64,
        discount_threshold: f64,
    ) -> Result<f64, OrderError> {
        ensure_non_negative(&[item_price, f64::from(count), tax_rate, discount, discount_threshold])?;

        let subtotal = item_price * f64::from(count);
        let discount = if subtotal > discount_threshold { discount } else { 0.0 };

        let total = match self.stage {
            DiscountStage::BeforeTax => (subtotal - discount) * (1.0 + tax_rate),
            DiscountStage::AfterTax => subtotal * (1.0 + tax_rate) - discount,
        };

        tracing::trace!(
            subtotal = subtotal,
            discount = discount,
            stage = ?self.stage,
            total = total,
            "Calculated order total"
        );

        Ok(round_and_clamp(total))
    }
}

/// First-generation formula: tax first, then the discount unconditionally.
///
/// Kept so regressions against the threshold-gated calculator stay visible.
pub fn legacy_total(item_price: f64, count: i32, tax_rate: f64, discount: f64) -> Result<f64, OrderError> {
    ensure_non_negative(&[item_price, f64::from(count), tax_rate, discount])?;

    let total = item_price * f64::from(count) * (1.0 + tax_rate) - discount;
    Ok(round_and_clamp(total))
}

fn ensure_non_negative(values: &[f64]) -> Result<(), OrderError> {
    // NaN fails `>= 0.0`, so it is rejected alongside negatives
    if values.iter().all(|v| *v >= 0.0) {
        Ok(())
    } else {
        Err(OrderError::InvalidArgument)
    }
}

fn round_and_clamp(total: f64) -> f64 {
    let rounded = total.round();
    if rounded == f64::INFINITY {
        f64::MAX
    } else if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
