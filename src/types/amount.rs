use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Neg, Sub};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount(i64);  // Signed money in currency minor units

impl Amount {
    pub fn from_i64(value: i64) -> Self {
        Amount(value)
    }

    pub fn to_i64(&self) -> i64 {
        self.0
    }

    pub fn zero() -> Self {
        Amount(0)
    }

    pub fn abs(&self) -> Self {
        Amount(self.0.abs())
    }

    pub fn is_negative(&self) -> bool {
        self.0 < 0
    }

    pub fn is_positive(&self) -> bool {
        self.0 > 0
    }
}

impl Add for Amount {
    type Output = Amount;
    fn add(self, other: Amount) -> Amount {
        Amount(self.0 + other.0)
    }
}

impl Sub for Amount {
    type Output = Amount;
    fn sub(self, other: Amount) -> Amount {
        Amount(self.0 - other.0)
    }
}

impl Neg for Amount {
    type Output = Amount;
    fn neg(self) -> Amount {
        Amount(-self.0)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::Amount;

    #[test]
    fn arithmetic() {
        let a = Amount::from_i64(500);
        let b = Amount::from_i64(200);
        assert_eq!(Amount::from_i64(700), a + b);
        assert_eq!(Amount::from_i64(300), a - b);
        assert_eq!(Amount::from_i64(-500), -a);
    }

    #[test]
    fn sign_checks() {
        assert!(Amount::from_i64(-1).is_negative());
        assert!(Amount::from_i64(1).is_positive());
        assert!(!Amount::zero().is_positive());
        assert!(!Amount::zero().is_negative());
        assert_eq!(Amount::from_i64(7), Amount::from_i64(-7).abs());
    }
}
