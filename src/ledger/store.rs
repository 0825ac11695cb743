use crate::config::LedgerConfig;
use crate::error::{Error, Result};
use crate::interfaces::ledger_store::LedgerStore;
use crate::ledger::account::Account;
use crate::ledger::entry::{EntryKind, LedgerEntry};
use crate::observability;
use crate::types::amount::Amount;
use crate::types::ids::{AccountId, UserId};
use crate::types::timestamp::Timestamp;
use crate::utils::helper;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// In-memory transactional record store.
///
/// Each account carries a version token. A mutation reads a snapshot,
/// validates against it, then commits under the account's lock only if the
/// version is unchanged; a lost race re-reads and retries up to
/// `max_commit_retries` times. The journal append happens under the same
/// lock as the balance write, so no reader sees one without the other.
///
/// Lock order is always accounts before journals.
pub struct MemoryLedgerStore {
    accounts: DashMap<AccountId, Account>,
    journals: DashMap<AccountId, Vec<LedgerEntry>>,
    max_commit_retries: u32,
}

impl MemoryLedgerStore {
    pub fn new() -> Self {
        Self::with_config(LedgerConfig::default())
    }

    pub fn with_config(config: LedgerConfig) -> Self {
        MemoryLedgerStore {
            accounts: DashMap::new(),
            journals: DashMap::new(),
            max_commit_retries: config.max_commit_retries,
        }
    }

    /// Snapshot of every account, for invariant sweeps and audit export.
    pub fn accounts(&self) -> Vec<Account> {
        self.accounts.iter().map(|a| a.value().clone()).collect()
    }

    /// Every committed entry across all accounts, in commit order.
    pub fn all_entries(&self) -> Vec<LedgerEntry> {
        let mut entries: Vec<LedgerEntry> = self
            .journals
            .iter()
            .flat_map(|journal| journal.value().clone())
            .collect();
        entries.sort_by_key(|e| e.created_at);
        entries
    }
}

impl Default for MemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerStore for MemoryLedgerStore {
    fn create_account(&self, user_id: UserId) -> Result<Account> {
        let account = Account::new(user_id);
        match self.accounts.entry(account.account_id) {
            Entry::Occupied(_) => Err(Error::AccountAlreadyExists(account.account_id)),
            Entry::Vacant(slot) => {
                slot.insert(account.clone());
                tracing::info!(account_id = %account.account_id, "account created");
                Ok(account)
            }
        }
    }

    fn account(&self, account_id: AccountId) -> Result<Account> {
        self.accounts
            .get(&account_id)
            .map(|account| account.value().clone())
            .ok_or(Error::AccountNotFound(account_id))
    }

    fn apply_entry(
        &self,
        account_id: AccountId,
        kind: EntryKind,
        amount: Amount,
        reference: Option<String>,
        description: String,
    ) -> Result<LedgerEntry> {
        let span = observability::tracing::ledger_commit_span(&account_id);
        let _enter = span.enter();

        for attempt in 0..self.max_commit_retries {
            let snapshot = self.account(account_id)?;
            let balance_before = snapshot.balance;
            let balance_after = balance_before + amount;
            if balance_after.is_negative() {
                return Err(Error::InsufficientFunds {
                    requested: amount.abs(),
                    available: balance_before,
                });
            }

            let mut slot = self
                .accounts
                .get_mut(&account_id)
                .ok_or(Error::AccountNotFound(account_id))?;
            if slot.version != snapshot.version {
                // Lost the race; re-read the committed balance and try again.
                drop(slot);
                tracing::debug!(account_id = %account_id, attempt, "commit raced, retrying");
                continue;
            }

            let now = Timestamp::now();
            slot.balance = balance_after;
            slot.version += 1;
            slot.updated_at = now;

            let entry = LedgerEntry {
                entry_id: helper::generate_entry_id(),
                account_id,
                kind,
                amount,
                balance_before,
                balance_after,
                reference,
                description,
                created_at: now,
            };

            // Appended while the account lock is still held: balance and
            // journal commit as one unit.
            self.journals.entry(account_id).or_default().push(entry.clone());

            return Ok(entry);
        }

        Err(Error::ConcurrencyConflict(account_id))
    }

    fn entries(&self, account_id: AccountId) -> Vec<LedgerEntry> {
        // Taking the account lock first means a half-committed mutation
        // (balance written, entry not yet appended) can never be observed.
        let _guard = self.accounts.get(&account_id);
        self.journals
            .get(&account_id)
            .map(|journal| journal.value().clone())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn store_with_balance(balance: i64) -> (MemoryLedgerStore, AccountId) {
        let store = MemoryLedgerStore::new();
        let account = store.create_account(UserId::new()).unwrap();
        if balance > 0 {
            store
                .apply_entry(
                    account.account_id,
                    EntryKind::Deposit,
                    Amount::from_i64(balance),
                    None,
                    "seed".to_string(),
                )
                .unwrap();
        }
        (store, account.account_id)
    }

    #[test]
    fn create_account_rejects_duplicates() {
        let store = MemoryLedgerStore::new();
        let user_id = UserId::new();
        store.create_account(user_id).unwrap();
        assert!(matches!(
            store.create_account(user_id),
            Err(Error::AccountAlreadyExists(_))
        ));
    }

    #[test]
    fn entry_records_before_and_after() {
        let (store, account_id) = store_with_balance(1_000);
        let entry = store
            .apply_entry(
                account_id,
                EntryKind::Deposit,
                Amount::from_i64(250),
                Some("pay-42".to_string()),
                "Deposit via card".to_string(),
            )
            .unwrap();

        assert_eq!(Amount::from_i64(1_000), entry.balance_before);
        assert_eq!(Amount::from_i64(1_250), entry.balance_after);
        assert_eq!(Some("pay-42".to_string()), entry.reference);
        assert_eq!(Amount::from_i64(1_250), store.account(account_id).unwrap().balance);
    }

    #[test]
    fn overdraft_leaves_state_untouched() {
        let (store, account_id) = store_with_balance(500);
        let before_entries = store.entries(account_id).len();

        let result = store.apply_entry(
            account_id,
            EntryKind::Withdrawal,
            Amount::from_i64(-501),
            None,
            "overdraft attempt".to_string(),
        );

        assert!(matches!(result, Err(Error::InsufficientFunds { .. })));
        assert_eq!(Amount::from_i64(500), store.account(account_id).unwrap().balance);
        assert_eq!(before_entries, store.entries(account_id).len());
    }

    #[test]
    fn withdrawal_to_zero_is_allowed() {
        let (store, account_id) = store_with_balance(500);
        let entry = store
            .apply_entry(
                account_id,
                EntryKind::Withdrawal,
                Amount::from_i64(-500),
                None,
                "drain".to_string(),
            )
            .unwrap();
        assert_eq!(Amount::zero(), entry.balance_after);
    }

    #[test]
    fn version_bumps_on_every_commit() {
        let (store, account_id) = store_with_balance(0);
        let v0 = store.account(account_id).unwrap().version;
        for _ in 0..3 {
            store
                .apply_entry(account_id, EntryKind::Deposit, Amount::from_i64(10), None, "d".to_string())
                .unwrap();
        }
        assert_eq!(v0 + 3, store.account(account_id).unwrap().version);
    }

    #[test]
    fn journal_chains_and_sums_to_balance() {
        let (store, account_id) = store_with_balance(1_000);
        store
            .apply_entry(account_id, EntryKind::Withdrawal, Amount::from_i64(-300), None, "w".to_string())
            .unwrap();
        store
            .apply_entry(account_id, EntryKind::Deposit, Amount::from_i64(120), None, "d".to_string())
            .unwrap();

        let entries = store.entries(account_id);
        let total: i64 = entries.iter().map(|e| e.amount.to_i64()).sum();
        assert_eq!(store.account(account_id).unwrap().balance.to_i64(), total);

        for window in entries.windows(2) {
            assert_eq!(window[0].balance_after, window[1].balance_before);
        }
    }

    #[test]
    fn unknown_account_is_rejected() {
        let store = MemoryLedgerStore::new();
        assert!(matches!(
            store.apply_entry(
                AccountId::new(),
                EntryKind::Deposit,
                Amount::from_i64(1),
                None,
                "ghost".to_string()
            ),
            Err(Error::AccountNotFound(_))
        ));
    }

    #[test]
    fn concurrent_full_withdrawals_allow_exactly_one_winner() {
        let (store, account_id) = store_with_balance(10_000);
        let store = Arc::new(store);

        let handles: Vec<_> = (0..50)
            .map(|_| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    store.apply_entry(
                        account_id,
                        EntryKind::Withdrawal,
                        Amount::from_i64(-10_000),
                        None,
                        "full withdrawal".to_string(),
                    )
                })
            })
            .collect();

        let mut successes = 0;
        for handle in handles {
            match handle.join().unwrap() {
                Ok(_) => successes += 1,
                Err(Error::InsufficientFunds { .. }) | Err(Error::ConcurrencyConflict(_)) => {}
                Err(other) => panic!("unexpected error: {other}"),
            }
        }

        assert_eq!(1, successes);
        let balance = store.account(account_id).unwrap().balance;
        assert!(!balance.is_negative());
        assert_eq!(Amount::zero(), balance);
    }
}
