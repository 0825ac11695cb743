use crate::error::Result;
use crate::ledger::account::Account;
use crate::ledger::entry::{EntryKind, LedgerEntry};
use crate::types::amount::Amount;
use crate::types::ids::{AccountId, UserId};

/// Transactional record store for wallet balances.
///
/// `apply_entry` is the single mutation primitive: one call reads the
/// balance, rejects an overdraft, persists the new balance and appends the
/// ledger entry as one atomic unit. Implementations must linearize
/// concurrent calls against the same account, retry a lost optimistic race
/// internally a bounded number of times, and only then surface
/// `Error::ConcurrencyConflict`. Backends with a fallible transport map
/// outages to `Error::StorageUnavailable`.
pub trait LedgerStore: Send + Sync {
    fn create_account(&self, user_id: UserId) -> Result<Account>;

    /// Snapshot of the account at the latest committed version.
    fn account(&self, account_id: AccountId) -> Result<Account>;

    fn apply_entry(
        &self,
        account_id: AccountId,
        kind: EntryKind,
        amount: Amount,
        reference: Option<String>,
        description: String,
    ) -> Result<LedgerEntry>;

    /// Committed journal for one account, in commit order.
    fn entries(&self, account_id: AccountId) -> Vec<LedgerEntry>;
}
