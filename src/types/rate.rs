use crate::types::amount::Amount;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};

pub const RATE_MULTIPLIER: i64 = 100_000_000;  // 10^8

/// A fraction in 10^8 fixed point. `Rate::from_percent(5.0)` is 0.05.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Rate {
    value: i64,
}

impl Rate {
    /// Create from raw fixed-point value
    pub fn from_raw(value: i64) -> Self {
        Rate { value }
    }

    /// Get raw fixed-point value
    pub fn raw_value(&self) -> i64 {
        self.value
    }

    /// Create from a percentage (for configuration/initialization only)
    pub fn from_percent(percent: f64) -> Self {
        Rate {
            value: (percent / 100.0 * RATE_MULTIPLIER as f64).round() as i64,
        }
    }

    /// Convert to a percentage for display purposes only
    pub fn to_percent(&self) -> f64 {
        self.value as f64 * 100.0 / RATE_MULTIPLIER as f64
    }

    /// Convert to f64 for display purposes only
    pub fn to_f64(&self) -> f64 {
        self.value as f64 / RATE_MULTIPLIER as f64
    }

    pub fn zero() -> Self {
        Rate { value: 0 }
    }

    pub fn one() -> Self {
        Rate { value: RATE_MULTIPLIER }
    }

    /// amount * rate, floored to the minor unit. Uses i128 to avoid overflow.
    pub fn apply_floor(&self, amount: Amount) -> Amount {
        let scaled = amount.to_i64() as i128 * self.value as i128;
        Amount::from_i64(scaled.div_euclid(RATE_MULTIPLIER as i128) as i64)
    }

    /// amount * rate, rounded half-up to the minor unit.
    /// Callers only apply this to non-negative amounts.
    pub fn apply_half_up(&self, amount: Amount) -> Amount {
        let scaled = amount.to_i64() as i128 * self.value as i128;
        let half = RATE_MULTIPLIER as i128 / 2;
        Amount::from_i64(((scaled + half) / RATE_MULTIPLIER as i128) as i64)
    }
}

impl Add for Rate {
    type Output = Rate;
    fn add(self, other: Rate) -> Rate {
        Rate { value: self.value + other.value }
    }
}

impl Sub for Rate {
    type Output = Rate;
    fn sub(self, other: Rate) -> Rate {
        Rate { value: self.value - other.value }
    }
}

impl fmt::Display for Rate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.to_percent())
    }
}
