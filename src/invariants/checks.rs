use crate::error::{Error, InvariantViolation, Result};
use crate::interfaces::ledger_store::LedgerStore;
use crate::ledger::account::Account;
use crate::ledger::reconciliation::Reconciliation;
use crate::ledger::store::MemoryLedgerStore;
use crate::types::amount::Amount;

pub struct InvariantChecks;

impl InvariantChecks {
    /// No account may ever hold a negative balance.
    pub fn check_no_negative_balances(accounts: &[Account]) -> Result<()> {
        for account in accounts {
            if account.balance < Amount::zero() {
                return Err(Error::InvariantViolation(InvariantViolation {
                    invariant: "no_negative_balances",
                    details: format!(
                        "Account {:?} has negative balance: {}",
                        account.account_id, account.balance
                    ),
                }));
            }
        }
        Ok(())
    }

    /// Full sweep over a store: every balance non-negative, every journal
    /// internally consistent and equal to its account's balance.
    pub fn check_store(store: &MemoryLedgerStore) -> Result<()> {
        let accounts = store.accounts();
        Self::check_no_negative_balances(&accounts)?;

        for account in &accounts {
            Reconciliation::verify_entry_chain(&store.entries(account.account_id))?;
            Reconciliation::reconcile_account(store, account.account_id)?;
        }
        Ok(())
    }
}
