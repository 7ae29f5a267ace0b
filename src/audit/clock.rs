use chrono::{Local, NaiveDateTime};

// ============================================================================
// Time Source
// ============================================================================

/// Supplies "now" for audit timestamps.
///
/// Any `Fn() -> NaiveDateTime` closure is a clock, which keeps tests free of
/// wall-clock time.
#[cfg_attr(test, mockall::automock)]
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// Local wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

impl<F> Clock for F
where
    F: Fn() -> NaiveDateTime,
{
    fn now(&self) -> NaiveDateTime {
        self()
    }
}
