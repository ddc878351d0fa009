use chrono::{DateTime, Duration, Utc};

/// Trailing window anchored at the run's reference instant.
///
/// The reference instant is fixed when the scan starts, so every membership
/// check of a single run is answered against the same "now".
#[derive(Debug, Clone, Copy)]
pub struct TimeFrame {
    now: DateTime<Utc>,
    extent: Duration,
}

impl TimeFrame {
    pub fn trailing_week(now: DateTime<Utc>) -> Self {
        Self {
            now,
            extent: Duration::days(7),
        }
    }

    /// An instant exactly one extent old is already outside.
    pub fn contains(&self, instant: DateTime<Utc>) -> bool {
        self.now - instant < self.extent
    }
}
