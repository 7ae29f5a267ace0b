// ============================================================================
// Audit Trail
// ============================================================================
//
// Timestamped, human-readable records of actions taken on orders, plus the
// batch update loop that produces them. Independent of `OrderService`.
//
// ============================================================================

pub mod clock;
pub mod entry;
pub mod service;

pub use clock::{Clock, FixedClock, SystemClock};
pub use entry::{is_entry_older_than, parse_timestamp, AuditEntry, AuditParseError};
pub use service::{EligibilityPolicy, OrderAuditService, StandardEligibility, UPDATED, UPDATED_FAILED};
