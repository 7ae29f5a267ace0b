use std::collections::BTreeMap;
use std::sync::RwLock;

use super::aggregate::Order;
use super::errors::RepositoryError;

// ============================================================================
// Order Repository - Persistence Port
// ============================================================================
//
// The services only consume this contract. Every call is assumed atomic and
// immediately consistent; adapters report failures as `RepositoryError`.
//
// ============================================================================

#[cfg_attr(test, mockall::automock)]
pub trait OrderRepository {
    /// Persist a new order.
    fn save(&self, order: &Order) -> Result<(), RepositoryError>;

    fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError>;

    /// Persist a change to an existing order.
    fn update(&self, order: &Order) -> Result<(), RepositoryError>;

    fn exists(&self, order_id: &str) -> Result<bool, RepositoryError>;
}

// ============================================================================
// In-Memory Adapter
// ============================================================================

/// Map-backed repository for wiring and tests.
///
/// The lock only lets the repository sit behind a shared `Arc`; callers are
/// still expected to drive it from a single thread.
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<BTreeMap<String, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.read().map(|orders| orders.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

fn poisoned<E>(_: E) -> RepositoryError {
    RepositoryError::Unavailable("order map lock poisoned".to_string())
}

impl OrderRepository for InMemoryOrderRepository {
    fn save(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        if orders.contains_key(order.order_id()) {
            return Err(RepositoryError::Duplicate(order.order_id().to_string()));
        }

        orders.insert(order.order_id().to_string(), order.clone());
        Ok(())
    }

    fn find_by_id(&self, order_id: &str) -> Result<Option<Order>, RepositoryError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.get(order_id).cloned())
    }

    fn update(&self, order: &Order) -> Result<(), RepositoryError> {
        let mut orders = self.orders.write().map_err(poisoned)?;
        match orders.get_mut(order.order_id()) {
            Some(stored) => {
                *stored = order.clone();
                Ok(())
            }
            None => Err(RepositoryError::Missing(order.order_id().to_string())),
        }
    }

    fn exists(&self, order_id: &str) -> Result<bool, RepositoryError> {
        let orders = self.orders.read().map_err(poisoned)?;
        Ok(orders.contains_key(order_id))
    }
}
