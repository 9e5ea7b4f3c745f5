//! Time source for task timestamps.

use chrono::{DateTime, SubsecRound, Utc};

/// Supplies the current time.
pub trait Clock {
    /// Current time in UTC.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock, truncated to milliseconds to match the stored precision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now().trunc_subsecs(3)
    }
}
