use crate::error::{Error, Result};
use crate::interfaces::ledger_store::LedgerStore;
use crate::ledger::entry::EntryKind;
use crate::observability;
use crate::types::amount::Amount;
use crate::types::ids::{AccountId, EntryId, ReferralId, UserId};
use crate::types::rate::Rate;
use crate::types::timestamp::Timestamp;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Link crediting one user for transactions generated by another they
/// introduced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Referral {
    pub referral_id: ReferralId,
    pub referrer_id: UserId,
    pub referred_id: UserId,
    pub commission_rate: Rate,
    /// Running accumulator; moves in lock-step with the referrer's ledger.
    pub total_commission: Amount,
    pub status: ReferralStatus,
    pub created_at: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReferralStatus {
    Active,
    Suspended,
}

#[derive(Clone, Debug, Serialize)]
pub struct ReferralReceipt {
    pub referral_id: ReferralId,
    pub commission: Amount,
    pub balance: Amount,
    pub entry_id: EntryId,
}

pub struct ReferralEngine<S: LedgerStore> {
    referrals: DashMap<ReferralId, Referral>,
    store: Arc<S>,
}

impl<S: LedgerStore> ReferralEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        ReferralEngine {
            referrals: DashMap::new(),
            store,
        }
    }

    pub fn register(
        &self,
        referrer_id: UserId,
        referred_id: UserId,
        commission_rate: Rate,
    ) -> Referral {
        let referral = Referral {
            referral_id: ReferralId::new(),
            referrer_id,
            referred_id,
            commission_rate,
            total_commission: Amount::zero(),
            status: ReferralStatus::Active,
            created_at: Timestamp::now(),
        };
        self.referrals.insert(referral.referral_id, referral.clone());
        referral
    }

    pub fn referral(&self, referral_id: ReferralId) -> Result<Referral> {
        self.referrals
            .get(&referral_id)
            .map(|referral| referral.value().clone())
            .ok_or(Error::ReferralNotFound(referral_id))
    }

    pub fn suspend(&self, referral_id: ReferralId) -> Result<()> {
        let mut referral = self
            .referrals
            .get_mut(&referral_id)
            .ok_or(Error::ReferralNotFound(referral_id))?;
        referral.status = ReferralStatus::Suspended;
        Ok(())
    }

    /// Credit the referrer for a commissionable transaction of the referred
    /// user. The ledger credit and the accumulator move together: the
    /// accumulator is only bumped once the credit has committed, and the
    /// referral stays locked in between, so the two can never diverge.
    pub fn accrue(
        &self,
        referral_id: ReferralId,
        base_amount: Amount,
        reference: &str,
    ) -> Result<ReferralReceipt> {
        let span = observability::tracing::referral_accrual_span(&referral_id);
        let _enter = span.enter();

        if !base_amount.is_positive() {
            return Err(Error::InvalidAmount(base_amount));
        }

        let mut referral = self
            .referrals
            .get_mut(&referral_id)
            .ok_or(Error::ReferralNotFound(referral_id))?;
        if referral.status != ReferralStatus::Active {
            return Err(Error::ReferralInactive(referral_id));
        }

        let commission = referral.commission_rate.apply_half_up(base_amount);
        let account_id = AccountId::from_user(referral.referrer_id);

        let entry = self.store.apply_entry(
            account_id,
            EntryKind::ReferralCommission,
            commission,
            Some(reference.to_string()),
            format!("Referral commission on {}", reference),
        )?;

        referral.total_commission = referral.total_commission + commission;

        tracing::info!(
            referral_id = %referral_id,
            commission = %commission,
            total = %referral.total_commission,
            "referral commission accrued"
        );
        Ok(ReferralReceipt {
            referral_id,
            commission,
            balance: entry.balance_after,
            entry_id: entry.entry_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::store::MemoryLedgerStore;

    fn engine_with_referrer() -> (ReferralEngine<MemoryLedgerStore>, Referral, AccountId) {
        let store = Arc::new(MemoryLedgerStore::new());
        let referrer_id = UserId::new();
        let account = store.create_account(referrer_id).unwrap();
        let engine = ReferralEngine::new(store);
        let referral = engine.register(referrer_id, UserId::new(), Rate::from_percent(5.0));
        (engine, referral, account.account_id)
    }

    #[test]
    fn accrual_worked_example() {
        // 5% of 200_000 credits exactly 10_000
        let (engine, referral, account_id) = engine_with_referrer();

        let receipt = engine
            .accrue(referral.referral_id, Amount::from_i64(200_000), "order-55")
            .unwrap();

        assert_eq!(Amount::from_i64(10_000), receipt.commission);
        assert_eq!(Amount::from_i64(10_000), receipt.balance);
        assert_eq!(
            Amount::from_i64(10_000),
            engine.referral(referral.referral_id).unwrap().total_commission
        );

        let entries = engine.store.entries(account_id);
        assert_eq!(1, entries.len());
        assert_eq!(EntryKind::ReferralCommission, entries[0].kind);
        assert_eq!(Some("order-55".to_string()), entries[0].reference);
    }

    #[test]
    fn accruals_accumulate() {
        let (engine, referral, _) = engine_with_referrer();
        engine
            .accrue(referral.referral_id, Amount::from_i64(200_000), "order-1")
            .unwrap();
        engine
            .accrue(referral.referral_id, Amount::from_i64(100_000), "order-2")
            .unwrap();
        assert_eq!(
            Amount::from_i64(15_000),
            engine.referral(referral.referral_id).unwrap().total_commission
        );
    }

    #[test]
    fn non_positive_base_is_rejected() {
        let (engine, referral, _) = engine_with_referrer();
        assert!(matches!(
            engine.accrue(referral.referral_id, Amount::zero(), "order-1"),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn suspended_referral_stops_accruing() {
        let (engine, referral, _) = engine_with_referrer();
        engine.suspend(referral.referral_id).unwrap();
        assert!(matches!(
            engine.accrue(referral.referral_id, Amount::from_i64(200_000), "order-1"),
            Err(Error::ReferralInactive(_))
        ));
        assert_eq!(
            Amount::zero(),
            engine.referral(referral.referral_id).unwrap().total_commission
        );
    }

    #[test]
    fn failed_credit_leaves_accumulator_untouched() {
        // Referrer without a wallet account: the credit fails, so the
        // accumulator must not move.
        let store = Arc::new(MemoryLedgerStore::new());
        let engine = ReferralEngine::new(store);
        let referral = engine.register(UserId::new(), UserId::new(), Rate::from_percent(5.0));

        assert!(matches!(
            engine.accrue(referral.referral_id, Amount::from_i64(200_000), "order-1"),
            Err(Error::AccountNotFound(_))
        ));
        assert_eq!(
            Amount::zero(),
            engine.referral(referral.referral_id).unwrap().total_commission
        );
    }

    #[test]
    fn unknown_referral_is_rejected() {
        let (engine, _, _) = engine_with_referrer();
        assert!(matches!(
            engine.accrue(ReferralId::new(), Amount::from_i64(1_000), "order-1"),
            Err(Error::ReferralNotFound(_))
        ));
    }
}
