use super::value_objects::OrderStatus;

// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum OrderError {
    #[error("Negative values are not allowed")]
    InvalidArgument,

    #[error("Order already exists: {0}")]
    AlreadyExists(String),

    #[error("Order not found: {0}")]
    NotFound(String),

    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("Repository failure: {0}")]
    Persistence(#[from] RepositoryError),
}

// ============================================================================
// Repository Errors
// ============================================================================

/// Opaque storage failure reported by an `OrderRepository` adapter.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RepositoryError {
    #[error("Order {0} is already stored")]
    Duplicate(String),

    #[error("Order {0} is not stored")]
    Missing(String),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message() {
        assert_eq!(
            OrderError::InvalidArgument.to_string(),
            "Negative values are not allowed"
        );
    }

    #[test]
    fn test_invalid_transition_message() {
        let err = OrderError::InvalidTransition {
            from: OrderStatus::Confirmed,
            to: OrderStatus::Cancelled,
        };
        assert_eq!(err.to_string(), "Cannot move order from confirmed to cancelled");
    }

    #[test]
    fn test_repository_error_converts() {
        let err: OrderError = RepositoryError::Unavailable("disk".to_string()).into();
        assert!(matches!(err, OrderError::Persistence(RepositoryError::Unavailable(_))));
    }
}
