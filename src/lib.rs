//! Order lifecycle domain: total calculation, status transitions and an
//! in-memory audit trail over a pluggable order repository.

pub mod audit;
pub mod config;
pub mod domain;
pub mod metrics;

pub use audit::OrderAuditService;
pub use config::{AppConfig, AuditConfig, PricingConfig};
pub use domain::order::{
    Order, OrderError, OrderRepository, OrderService, OrderStatus, RepositoryError,
};
pub use metrics::Metrics;
