use std::fmt::Write as _;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::audit::entry::parse_timestamp;
use crate::domain::order::DiscountStage;

// ============================================================================
// Application Configuration
// ============================================================================
//
// Plain typed structs with defaults and named presets. Every field is
// optional in the serialized form; missing fields fall back to `Default`.
//
// ============================================================================

/// Timestamp layout used both to stamp and to parse audit entries.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub pricing: PricingConfig,
    pub audit: AuditConfig,
}

impl AppConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).context("Failed to parse application config")?;
        config.audit.validate()?;
        Ok(config)
    }
}

/// Discount applied by `OrderService::create_order`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Amount subtracted once the subtotal exceeds the threshold
    pub discount: f64,
    /// Subtotal that must be strictly exceeded before discounting
    pub discount_threshold: f64,
    pub discount_stage: DiscountStage,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            discount: 0.0,
            discount_threshold: 0.0,
            discount_stage: DiscountStage::BeforeTax,
        }
    }
}

impl PricingConfig {
    /// Flat 50 off orders above 150, taken before tax
    pub fn promotional() -> Self {
        Self {
            discount: 50.0,
            discount_threshold: 150.0,
            discount_stage: DiscountStage::BeforeTax,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// chrono format string for entry timestamps
    pub timestamp_format: String,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
        }
    }
}

impl AuditConfig {
    /// Check that a stamped timestamp can be read back by pruning.
    ///
    /// The calendar date must survive the round trip; time-of-day may be
    /// truncated (a date-only format reads back as midnight).
    pub fn validate(&self) -> Result<()> {
        let Some(reference) = NaiveDate::from_ymd_opt(2001, 2, 3).and_then(|d| d.and_hms_opt(4, 5, 6))
        else {
            bail!("Failed to build reference instant");
        };

        let mut stamped = String::new();
        if write!(stamped, "{}", reference.format(&self.timestamp_format)).is_err() {
            bail!("Invalid audit timestamp format: {}", self.timestamp_format);
        }

        match parse_timestamp(&format!("[{stamped}]"), &self.timestamp_format) {
            Ok(parsed) if parsed.date() == reference.date() => Ok(()),
            _ => bail!(
                "Audit timestamp format {} cannot be parsed back for pruning",
                self.timestamp_format
            ),
        }
    }
}
