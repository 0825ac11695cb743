use crate::types::amount::Amount;
use serde::Serialize;

/// Display bucket over the continuous commission curve.
///
/// These are for reporting screens only. The percent label is a rounded
/// approximation of the formula at the middle of the range; recomputing fees
/// from it would drift at the tier boundaries, so nothing in
/// [`crate::commission::model`] reads this table.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct CommissionTier {
    pub min: i64,
    pub max: Option<i64>,
    pub approx_rate_percent: f64,
}

pub static TIERS: [CommissionTier; 9] = [
    CommissionTier { min: 1_000, max: Some(49_999), approx_rate_percent: 1.00 },
    CommissionTier { min: 50_000, max: Some(99_999), approx_rate_percent: 1.00 },
    CommissionTier { min: 100_000, max: Some(499_999), approx_rate_percent: 1.00 },
    CommissionTier { min: 500_000, max: Some(999_999), approx_rate_percent: 1.01 },
    CommissionTier { min: 1_000_000, max: Some(4_999_999), approx_rate_percent: 1.03 },
    CommissionTier { min: 5_000_000, max: Some(9_999_999), approx_rate_percent: 1.07 },
    CommissionTier { min: 10_000_000, max: Some(49_999_999), approx_rate_percent: 1.30 },
    CommissionTier { min: 50_000_000, max: Some(99_999_999), approx_rate_percent: 1.75 },
    CommissionTier { min: 100_000_000, max: None, approx_rate_percent: 2.00 },
];

/// Display tier containing `amount`, or `None` below the commission floor.
pub fn tier_for(amount: Amount) -> Option<&'static CommissionTier> {
    let value = amount.to_i64();
    TIERS
        .iter()
        .find(|tier| value >= tier.min && tier.max.is_none_or(|max| value <= max))
}
