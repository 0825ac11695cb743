use crate::error::{Error, Result};
use crate::interfaces::ledger_store::LedgerStore;
use crate::investment::plan::InvestmentPlan;
use crate::ledger::wallet::{Receipt, WalletLedger};
use crate::observability;
use crate::types::amount::Amount;
use crate::types::ids::{AccountId, InvestmentId, PlanId, UserId};
use crate::types::rate::{RATE_MULTIPLIER, Rate};
use crate::types::timestamp::Timestamp;
use crate::utils::helper;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};

/// Days in the simple-interest year basis.
pub const YEAR_BASIS_DAYS: u32 = 365;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Investment {
    pub investment_id: InvestmentId,
    pub user_id: UserId,
    pub plan_id: PlanId,
    /// Snapshot of the plan at open time; later plan edits never touch it.
    pub annual_return_rate: Rate,
    pub duration_days: u32,
    pub principal: Amount,
    pub expected_return: Amount,
    pub start_date: Timestamp,
    pub maturity_date: Timestamp,
    pub status: InvestmentStatus,
    pub closed_at: Option<Timestamp>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentStatus {
    Open,
    Closed,
}

/// Point-in-time valuation. Derived on demand, never stored, so a delayed
/// read can never drift from the ledger.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct AccrualView {
    pub days_passed: u64,
    pub progress: Rate,
    pub current_value: Amount,
}

impl Investment {
    /// Prorated value at `as_of`. Progress is clamped to [0, 1]: a position
    /// read before its start is worth its principal, and a matured position
    /// stops accruing at `expected_return`.
    pub fn value_at(&self, as_of: Timestamp) -> AccrualView {
        let days_passed = as_of.days_since(self.start_date);
        let effective_days = days_passed.min(self.duration_days as u64);

        let interest = self.expected_return - self.principal;
        let accrued = interest.to_i64() as i128 * effective_days as i128
            / self.duration_days as i128;
        let progress = effective_days as i128 * RATE_MULTIPLIER as i128
            / self.duration_days as i128;

        AccrualView {
            days_passed,
            progress: Rate::from_raw(progress as i64),
            current_value: self.principal + Amount::from_i64(accrued as i64),
        }
    }

    pub fn is_matured(&self, as_of: Timestamp) -> bool {
        as_of >= self.maturity_date
    }
}

/// Full-term simple interest against a 365-day year, floored to the minor
/// unit.
pub fn full_term_interest(principal: Amount, annual_rate: Rate, duration_days: u32) -> Amount {
    let scaled = principal.to_i64() as i128
        * annual_rate.raw_value() as i128
        * duration_days as i128;
    let basis = YEAR_BASIS_DAYS as i128 * RATE_MULTIPLIER as i128;
    Amount::from_i64((scaled / basis) as i64)
}

pub fn expected_return(principal: Amount, annual_rate: Rate, duration_days: u32) -> Amount {
    principal + full_term_interest(principal, annual_rate, duration_days)
}

#[derive(Clone, Debug, Serialize)]
pub struct OpenReceipt {
    pub investment: Investment,
    pub debit: Receipt,
}

#[derive(Clone, Debug, Serialize)]
pub struct CloseReceipt {
    pub investment: Investment,
    pub payout: Receipt,
}

/// Owns the plan registry and open positions; drives the wallet for every
/// fund movement.
pub struct InvestmentEngine<S: LedgerStore> {
    plans: DashMap<PlanId, InvestmentPlan>,
    positions: DashMap<InvestmentId, Investment>,
    wallet: WalletLedger<S>,
}

impl<S: LedgerStore> InvestmentEngine<S> {
    pub fn new(wallet: WalletLedger<S>) -> Self {
        InvestmentEngine {
            plans: DashMap::new(),
            positions: DashMap::new(),
            wallet,
        }
    }

    pub fn register_plan(&self, plan: InvestmentPlan) -> PlanId {
        let plan_id = plan.plan_id;
        self.plans.insert(plan_id, plan);
        plan_id
    }

    pub fn plan(&self, plan_id: PlanId) -> Result<InvestmentPlan> {
        self.plans
            .get(&plan_id)
            .map(|plan| plan.value().clone())
            .ok_or(Error::PlanNotFound(plan_id))
    }

    pub fn deactivate_plan(&self, plan_id: PlanId) -> Result<()> {
        let mut plan = self
            .plans
            .get_mut(&plan_id)
            .ok_or(Error::PlanNotFound(plan_id))?;
        plan.is_active = false;
        Ok(())
    }

    pub fn investment(&self, investment_id: InvestmentId) -> Result<Investment> {
        self.positions
            .get(&investment_id)
            .map(|position| position.value().clone())
            .ok_or(Error::InvestmentNotFound(investment_id))
    }

    /// Open a position: validate against the plan, persist the position,
    /// then debit the principal. A failed debit rolls the position back, so
    /// the open is all-or-nothing.
    pub fn open(&self, user_id: UserId, plan_id: PlanId, amount: Amount) -> Result<OpenReceipt> {
        let span = observability::tracing::investment_open_span(&plan_id);
        let _enter = span.enter();

        let plan = self.plan(plan_id)?;
        if !plan.is_active {
            return Err(Error::PlanInactive(plan_id));
        }
        plan.accepts(amount)?;

        let now = Timestamp::now();
        let investment = Investment {
            investment_id: helper::generate_investment_id(),
            user_id,
            plan_id,
            annual_return_rate: plan.annual_return_rate,
            duration_days: plan.duration_days,
            principal: amount,
            expected_return: expected_return(amount, plan.annual_return_rate, plan.duration_days),
            start_date: now,
            maturity_date: now.add_days(plan.duration_days),
            status: InvestmentStatus::Open,
            closed_at: None,
        };
        let investment_id = investment.investment_id;
        self.positions.insert(investment_id, investment.clone());

        let account_id = AccountId::from_user(user_id);
        let debit = match self.wallet.debit_for_investment(account_id, amount, investment_id) {
            Ok(receipt) => receipt,
            Err(err) => {
                self.positions.remove(&investment_id);
                return Err(err);
            }
        };

        tracing::info!(
            investment_id = %investment_id,
            principal = %amount,
            expected_return = %investment.expected_return,
            maturity = %investment.maturity_date,
            "investment opened"
        );
        Ok(OpenReceipt { investment, debit })
    }

    /// Valuation of a stored position at `as_of`.
    pub fn value_of(&self, investment_id: InvestmentId, as_of: Timestamp) -> Result<AccrualView> {
        Ok(self.investment(investment_id)?.value_at(as_of))
    }

    /// Redeem a matured position: pay `expected_return` back into the wallet
    /// and mark the position closed. Credit and close move together; a
    /// failed credit leaves the position open.
    pub fn close(&self, investment_id: InvestmentId, as_of: Timestamp) -> Result<CloseReceipt> {
        let span = observability::tracing::investment_close_span(&investment_id);
        let _enter = span.enter();

        let mut position = self
            .positions
            .get_mut(&investment_id)
            .ok_or(Error::InvestmentNotFound(investment_id))?;
        if position.status == InvestmentStatus::Closed {
            return Err(Error::InvestmentAlreadyClosed(investment_id));
        }
        if !position.is_matured(as_of) {
            return Err(Error::InvestmentNotMatured {
                investment_id,
                maturity: position.maturity_date,
            });
        }

        let account_id = AccountId::from_user(position.user_id);
        let payout = self.wallet.credit_investment_return(
            account_id,
            position.expected_return,
            investment_id,
        )?;

        position.status = InvestmentStatus::Closed;
        position.closed_at = Some(Timestamp::now());

        tracing::info!(
            investment_id = %investment_id,
            payout = %position.expected_return,
            "investment closed"
        );
        Ok(CloseReceipt {
            investment: position.value().clone(),
            payout,
        })
    }
}
