use crate::types::amount::Amount;
use crate::types::ids::{AccountId, EntryId};
use crate::types::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// Immutable audit record of one balance-affecting event. Appended exactly
/// once per mutation, never updated or deleted.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub entry_id: EntryId,
    pub account_id: AccountId,
    pub kind: EntryKind,
    pub amount: Amount,  // Signed: credits positive, debits negative
    pub balance_before: Amount,
    pub balance_after: Amount,
    /// Originating investment id or external payment reference, verbatim.
    pub reference: Option<String>,
    pub description: String,
    pub created_at: Timestamp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Deposit,
    Withdrawal,
    Investment,
    InvestmentReturn,
    Commission,
    ReferralCommission,
}
