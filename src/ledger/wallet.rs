use crate::TREASURY_USER_ID;
use crate::commission::model::{CommissionBreakdown, CommissionModel};
use crate::error::{Error, Result};
use crate::interfaces::ledger_store::LedgerStore;
use crate::ledger::entry::{EntryKind, LedgerEntry};
use crate::types::amount::Amount;
use crate::types::ids::{AccountId, EntryId, InvestmentId};
use serde::Serialize;
use std::sync::Arc;

/// Outcome of one wallet operation: the committed balance plus the entry id
/// for traceability.
#[derive(Clone, Debug, Serialize)]
pub struct Receipt {
    pub account_id: AccountId,
    pub balance: Amount,
    pub entry_id: EntryId,
}

impl Receipt {
    fn from_entry(entry: &LedgerEntry) -> Self {
        Receipt {
            account_id: entry.account_id,
            balance: entry.balance_after,
            entry_id: entry.entry_id,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct CommissionReceipt {
    pub breakdown: CommissionBreakdown,
    pub vendor: Receipt,
    pub treasury: Receipt,
}

/// Orchestrates wallet movements against the record store. All validation
/// happens before any mutation; the store's atomic primitive guarantees a
/// failed operation left no partial state behind.
///
/// The platform treasury account (`TREASURY_USER_ID`) must be created at
/// bootstrap for commission collection to settle.
pub struct WalletLedger<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> Clone for WalletLedger<S> {
    fn clone(&self) -> Self {
        WalletLedger {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: LedgerStore> WalletLedger<S> {
    pub fn new(store: Arc<S>) -> Self {
        WalletLedger { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Credit external funds. No upper bound at this layer; the payment
    /// gateway is assumed to have settled already.
    pub fn deposit(
        &self,
        account_id: AccountId,
        amount: Amount,
        method: &str,
        reference: Option<String>,
    ) -> Result<Receipt> {
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount));
        }

        let entry = self.store.apply_entry(
            account_id,
            EntryKind::Deposit,
            amount,
            reference,
            format!("Deposit via {}", method),
        )?;
        tracing::info!(
            account_id = %account_id,
            amount = %amount,
            balance = %entry.balance_after,
            "deposit settled"
        );
        Ok(Receipt::from_entry(&entry))
    }

    /// Debit funds for payout. The store rejects an overdraft.
    pub fn withdraw(
        &self,
        account_id: AccountId,
        amount: Amount,
        method: &str,
        destination: &str,
    ) -> Result<Receipt> {
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount));
        }
        if destination.trim().is_empty() {
            return Err(Error::MissingDestination);
        }

        let entry = self.store.apply_entry(
            account_id,
            EntryKind::Withdrawal,
            -amount,
            None,
            format!("Withdrawal via {} to {}", method, destination),
        )?;
        tracing::info!(
            account_id = %account_id,
            amount = %amount,
            balance = %entry.balance_after,
            "withdrawal settled"
        );
        Ok(Receipt::from_entry(&entry))
    }

    /// Move principal out of the wallet into an investment position.
    pub fn debit_for_investment(
        &self,
        account_id: AccountId,
        amount: Amount,
        investment_id: InvestmentId,
    ) -> Result<Receipt> {
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount));
        }

        let entry = self.store.apply_entry(
            account_id,
            EntryKind::Investment,
            -amount,
            Some(investment_id.to_string()),
            "Investment principal".to_string(),
        )?;
        Ok(Receipt::from_entry(&entry))
    }

    /// Pay a matured position back into the wallet.
    pub fn credit_investment_return(
        &self,
        account_id: AccountId,
        amount: Amount,
        investment_id: InvestmentId,
    ) -> Result<Receipt> {
        if !amount.is_positive() {
            return Err(Error::InvalidAmount(amount));
        }

        let entry = self.store.apply_entry(
            account_id,
            EntryKind::InvestmentReturn,
            amount,
            Some(investment_id.to_string()),
            "Matured investment payout".to_string(),
        )?;
        Ok(Receipt::from_entry(&entry))
    }

    /// Collect the vendor fee on a settled transaction: debit the vendor,
    /// credit the platform treasury. The two touches are independent
    /// single-account commits; only the treasury's existence is checked up
    /// front so a missing bootstrap fails before any mutation.
    pub fn charge_commission(
        &self,
        vendor_account_id: AccountId,
        transaction_amount: Amount,
        reference: &str,
    ) -> Result<CommissionReceipt> {
        let breakdown = CommissionModel::breakdown(transaction_amount)?;
        let treasury_account_id = AccountId::from_user(*TREASURY_USER_ID);
        self.store.account(treasury_account_id)?;

        let debit = self.store.apply_entry(
            vendor_account_id,
            EntryKind::Commission,
            -breakdown.fee,
            Some(reference.to_string()),
            format!("Vendor commission fee ({})", breakdown.rate),
        )?;
        let credit = self.store.apply_entry(
            treasury_account_id,
            EntryKind::Commission,
            breakdown.fee,
            Some(reference.to_string()),
            "Vendor commission collected".to_string(),
        )?;

        tracing::info!(
            vendor = %vendor_account_id,
            fee = %breakdown.fee,
            reference,
            "commission collected"
        );
        Ok(CommissionReceipt {
            breakdown,
            vendor: Receipt::from_entry(&debit),
            treasury: Receipt::from_entry(&credit),
        })
    }
}
