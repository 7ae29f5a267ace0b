use std::sync::Arc;

use chrono::{Duration, Local};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use order_lifecycle::audit::OrderAuditService;
use order_lifecycle::config::AppConfig;
use order_lifecycle::domain::order::{InMemoryOrderRepository, OrderRepository, OrderService};
use order_lifecycle::metrics::Metrics;

fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,order_lifecycle=debug")),
        )
        .init();

    // === 1. Configuration ===
    // ORDER_LIFECYCLE_CONFIG may hold a JSON document; missing fields default
    let config = match std::env::var("ORDER_LIFECYCLE_CONFIG") {
        Ok(json) => AppConfig::from_json_str(&json)?,
        Err(_) => AppConfig::default(),
    };
    tracing::info!(pricing = ?config.pricing, "Loaded configuration");

    // === 2. Wiring ===
    let metrics = Arc::new(Metrics::new()?);
    let repository = Arc::new(InMemoryOrderRepository::new());

    let orders = OrderService::with_pricing(repository.clone(), config.pricing.clone())
        .with_metrics(metrics.clone());
    let mut audit = OrderAuditService::new(repository.clone())
        .with_config(config.audit.clone())
        .with_metrics(metrics.clone());

    // === 3. Order lifecycle ===
    let first_id = uuid::Uuid::new_v4().to_string();
    let second_id = uuid::Uuid::new_v4().to_string();

    orders.create_order(&first_id, 100.0, 2, 0.1)?;
    orders.confirm_order(&first_id)?;
    audit.record_audit("CONFIRMED", &first_id);

    if let Err(err) = orders.cancel_order(&first_id) {
        tracing::warn!(order_id = %first_id, error = %err, "Cancellation rejected as expected");
    }

    orders.create_order(&second_id, 40.0, 3, 0.2)?;
    orders.cancel_order(&second_id)?;
    audit.record_audit("CANCELLED", &second_id);

    // === 4. Batch audit update ===
    let mut batch = Vec::new();
    for id in [&first_id, &second_id] {
        if let Some(order) = repository.find_by_id(id)? {
            batch.push(order);
        }
    }
    audit.process_order_update(&batch);

    for line in audit.get_audit_logs() {
        tracing::info!(entry = %line, "Audit log");
    }

    // === 5. Pruning ===
    let removed = audit.clear_old_entries(Local::now().naive_local() - Duration::days(7));
    tracing::info!(removed = removed, "Pruned entries older than a week");

    print!("{}", metrics.render()?);

    Ok(())
}
