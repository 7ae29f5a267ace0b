// ============================================================================
// Order Domain - Business Logic for the Order Lifecycle
// ============================================================================
//
// This module contains ALL Order-specific code:
// - Value objects (OrderStatus, DiscountStage)
// - Order value
// - Total calculation
// - Errors (OrderError, RepositoryError)
// - Repository port and its in-memory adapter
// - Service (OrderService, owner of the transition table)
//
// ============================================================================

pub mod value_objects;
pub mod aggregate;
pub mod calculator;
pub mod errors;
pub mod repository;
pub mod service;

// Re-export for convenience
pub use value_objects::*;
pub use aggregate::Order;
pub use calculator::{legacy_total, ThresholdCalculator, TotalCalculator};
pub use errors::*;
pub use repository::{InMemoryOrderRepository, OrderRepository};
pub use service::OrderService;
