use chrono::DateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub const MILLIS_PER_DAY: u64 = 86_400_000;

/// Millisecond wall-clock timestamp with a logical counter so that entries
/// created in the same millisecond (or under clock retrograde) still order
/// deterministically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp {
    pub millis: u64,
    pub counter: u64,
}

impl Timestamp {
    pub fn now() -> Self {
        CLOCK.now()
    }

    pub fn from_millis(millis: u64) -> Self {
        Timestamp { millis, counter: 0 }
    }

    pub fn as_millis(&self) -> u64 {
        self.millis
    }

    /// Whole calendar days elapsed since `earlier`, floored.
    /// Clamps to 0 when `self` precedes `earlier`.
    pub fn days_since(&self, earlier: Timestamp) -> u64 {
        self.millis.saturating_sub(earlier.millis) / MILLIS_PER_DAY
    }

    pub fn add_days(&self, days: u32) -> Timestamp {
        Timestamp {
            millis: self.millis + days as u64 * MILLIS_PER_DAY,
            counter: 0,
        }
    }

    pub fn to_rfc3339(&self) -> String {
        DateTime::from_timestamp_millis(self.millis as i64)
            .map(|dt| dt.to_rfc3339())
            .unwrap_or_default()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_rfc3339())
    }
}

/// Hybrid clock: wall-clock millis plus a counter that bumps whenever the
/// wall clock stands still or runs backwards.
struct WalletClock {
    last: Mutex<(u64, u64)>,
}

impl WalletClock {
    fn new() -> Self {
        WalletClock {
            last: Mutex::new((0, 0)),
        }
    }

    fn now(&self) -> Timestamp {
        let wall = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_millis() as u64;

        let mut last = self.last.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        let (millis, counter) = if wall > last.0 {
            (wall, 0)
        } else {
            (last.0, last.1 + 1)
        };
        *last = (millis, counter);

        Timestamp { millis, counter }
    }
}

lazy_static::lazy_static! {
    static ref CLOCK: WalletClock = WalletClock::new();
}
