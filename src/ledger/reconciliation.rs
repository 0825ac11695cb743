use crate::error::{Error, InvariantViolation, Result};
use crate::interfaces::ledger_store::LedgerStore;
use crate::ledger::entry::LedgerEntry;
use crate::types::amount::Amount;
use crate::types::ids::AccountId;

pub struct Reconciliation;

impl Reconciliation {
    /// Recompute an account's balance from its journal and compare against
    /// the stored balance.
    pub fn reconcile_account<S: LedgerStore>(store: &S, account_id: AccountId) -> Result<()> {
        let account = store.account(account_id)?;

        let replayed: i64 = store
            .entries(account_id)
            .iter()
            .map(|e| e.amount.to_i64())
            .sum();
        let expected = Amount::from_i64(replayed);

        if account.balance != expected {
            return Err(Error::ReconciliationFailed {
                expected,
                actual: account.balance,
            });
        }

        Ok(())
    }

    /// Every entry must balance internally and chain onto its predecessor.
    pub fn verify_entry_chain(entries: &[LedgerEntry]) -> Result<()> {
        let mut previous: Option<&LedgerEntry> = None;

        for entry in entries {
            if entry.balance_after != entry.balance_before + entry.amount {
                return Err(Error::InvariantViolation(InvariantViolation {
                    invariant: "entry_arithmetic",
                    details: format!(
                        "entry {} has before={} amount={} after={}",
                        entry.entry_id, entry.balance_before, entry.amount, entry.balance_after
                    ),
                }));
            }

            if let Some(prev) = previous {
                if entry.balance_before != prev.balance_after {
                    return Err(Error::InvariantViolation(InvariantViolation {
                        invariant: "entry_chain",
                        details: format!(
                            "entry {} starts at {} but predecessor ended at {}",
                            entry.entry_id, entry.balance_before, prev.balance_after
                        ),
                    }));
                }
            }
            previous = Some(entry);
        }

        Ok(())
    }
}
