use crate::types::amount::Amount;
use crate::types::ids::{AccountId, UserId};
use crate::types::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Account {
    pub account_id: AccountId,
    pub user_id: UserId,
    pub balance: Amount,
    /// Optimistic concurrency token; bumped on every committed mutation.
    pub version: u64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Account {
    pub fn new(user_id: UserId) -> Self {
        let now = Timestamp::now();
        Account {
            account_id: AccountId::from_user(user_id),
            user_id,
            balance: Amount::zero(),
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
