use crate::error::{Error, Result};
use crate::types::amount::Amount;
use crate::types::ids::PlanId;
use crate::types::rate::Rate;
use serde::{Deserialize, Serialize};

/// Template for investment positions. Rate and duration are snapshotted into
/// each position at open time, so editing a plan never changes money already
/// invested.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InvestmentPlan {
    pub plan_id: PlanId,
    pub name: String,
    pub min_amount: Amount,
    pub max_amount: Option<Amount>,  // None = unbounded
    pub annual_return_rate: Rate,
    pub duration_days: u32,
    pub is_active: bool,
}

impl InvestmentPlan {
    pub fn new(
        name: &str,
        min_amount: Amount,
        max_amount: Option<Amount>,
        annual_return_rate: Rate,
        duration_days: u32,
    ) -> Result<Self> {
        // A zero-day plan would divide by zero in every accrual computation.
        if duration_days == 0 {
            return Err(Error::InvalidDuration);
        }
        if let Some(max) = max_amount {
            if max < min_amount {
                return Err(Error::InvalidPlanBounds {
                    min: min_amount,
                    max,
                });
            }
        }

        Ok(InvestmentPlan {
            plan_id: PlanId::new(),
            name: name.to_string(),
            min_amount,
            max_amount,
            annual_return_rate,
            duration_days,
            is_active: true,
        })
    }

    /// Check an open amount against the plan's bounds. The maximum is
    /// inclusive: investing exactly `max_amount` is allowed.
    pub fn accepts(&self, amount: Amount) -> Result<()> {
        if amount < self.min_amount {
            return Err(Error::AmountBelowMinimum {
                amount,
                minimum: self.min_amount,
            });
        }
        if let Some(max) = self.max_amount {
            if amount > max {
                return Err(Error::AmountAboveMaximum {
                    amount,
                    maximum: max,
                });
            }
        }
        Ok(())
    }
}
