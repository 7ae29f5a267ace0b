// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// Order lifecycle: value, calculator, repository port and service.
// The audit trail lives in `crate::audit` and only depends on this layer
// through the repository port.
//
// ============================================================================

pub mod order;
