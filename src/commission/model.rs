use crate::error::{Error, Result};
use crate::types::amount::Amount;
use crate::types::rate::{RATE_MULTIPLIER, Rate};
use serde::Serialize;

/// Smallest commissionable transaction, in minor units.
pub const FLOOR_AMOUNT: i64 = 1_000;

/// Amount at and above which the rate is capped.
pub const CEILING_AMOUNT: i64 = 100_000_000;

// 1% at the floor, climbing by another 1% across the floor..ceiling span.
const BASE_RATE_RAW: i64 = RATE_MULTIPLIER / 100;
const RATE_SPAN_RAW: i64 = RATE_MULTIPLIER / 100;

#[derive(Clone, Copy, Debug, Serialize)]
pub struct CommissionBreakdown {
    pub rate: Rate,
    pub fee: Amount,
    pub net_amount: Amount,
}

pub struct CommissionModel;

impl CommissionModel {
    /// Vendor commission rate for a transaction amount.
    ///
    /// Scales linearly from 1% at 1,000 to 2% at 100,000,000 and is clamped
    /// to 2% above the ceiling. The curve is continuous; the display tiers
    /// in [`crate::commission::tiers`] never feed back into this.
    pub fn rate(amount: Amount) -> Result<Rate> {
        let value = amount.to_i64();
        if value < FLOOR_AMOUNT {
            return Err(Error::InvalidAmount(amount));
        }
        if value >= CEILING_AMOUNT {
            return Ok(Rate::from_raw(BASE_RATE_RAW + RATE_SPAN_RAW));
        }

        let climb = (value - FLOOR_AMOUNT) as i128 * RATE_SPAN_RAW as i128
            / (CEILING_AMOUNT - FLOOR_AMOUNT) as i128;
        Ok(Rate::from_raw(BASE_RATE_RAW + climb as i64))
    }

    /// Fee in minor units, rounded half-up.
    pub fn fee(amount: Amount) -> Result<Amount> {
        Ok(Self::rate(amount)?.apply_half_up(amount))
    }

    /// Rate, fee and net payout for a transaction. The fee rounding is
    /// absorbed into the net so that `net_amount + fee == amount` exactly.
    pub fn breakdown(amount: Amount) -> Result<CommissionBreakdown> {
        let rate = Self::rate(amount)?;
        let fee = rate.apply_half_up(amount);
        Ok(CommissionBreakdown {
            rate,
            fee,
            net_amount: amount - fee,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn below_floor_is_rejected() {
        assert!(matches!(
            CommissionModel::rate(Amount::from_i64(999)),
            Err(Error::InvalidAmount(_))
        ));
        assert!(matches!(
            CommissionModel::rate(Amount::from_i64(0)),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn rate_endpoints() {
        // 1% at the floor
        assert_eq!(1_000_000, CommissionModel::rate(Amount::from_i64(1_000)).unwrap().raw_value());
        // 2% at the ceiling, and the cap holds above it
        assert_eq!(2_000_000, CommissionModel::rate(Amount::from_i64(100_000_000)).unwrap().raw_value());
        assert_eq!(
            CommissionModel::rate(Amount::from_i64(100_000_000)).unwrap(),
            CommissionModel::rate(Amount::from_i64(200_000_000)).unwrap()
        );
    }

    #[test]
    fn fee_rounds_half_up() {
        // rate(1050) is still 1%; 1% of 1050 is 10.5, which rounds to 11
        assert_eq!(Amount::from_i64(11), CommissionModel::fee(Amount::from_i64(1_050)).unwrap());
        assert_eq!(Amount::from_i64(10), CommissionModel::fee(Amount::from_i64(1_000)).unwrap());
    }

    #[test]
    fn breakdown_worked_example() {
        let breakdown = CommissionModel::breakdown(Amount::from_i64(100_000_000)).unwrap();
        assert_eq!(2_000_000, breakdown.rate.raw_value());
        assert_eq!(Amount::from_i64(2_000_000), breakdown.fee);
        assert_eq!(Amount::from_i64(98_000_000), breakdown.net_amount);
    }

    proptest! {
        #[test]
        fn net_plus_fee_is_exact(value in FLOOR_AMOUNT..CEILING_AMOUNT) {
            let amount = Amount::from_i64(value);
            let breakdown = CommissionModel::breakdown(amount).unwrap();
            prop_assert_eq!(amount, breakdown.net_amount + breakdown.fee);
        }

        #[test]
        fn fee_is_monotonic(value in FLOOR_AMOUNT..CEILING_AMOUNT - 1) {
            let fee = CommissionModel::fee(Amount::from_i64(value)).unwrap();
            let next_fee = CommissionModel::fee(Amount::from_i64(value + 1)).unwrap();
            prop_assert!(fee <= next_fee);
        }

        #[test]
        fn rate_stays_in_band(value in FLOOR_AMOUNT..i64::MAX / RATE_MULTIPLIER) {
            let rate = CommissionModel::rate(Amount::from_i64(value)).unwrap();
            prop_assert!(rate.raw_value() >= 1_000_000);
            prop_assert!(rate.raw_value() <= 2_000_000);
        }
    }
}
