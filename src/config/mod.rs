use serde::{Deserialize, Serialize};

pub mod loader;

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LedgerConfig {
    /// Internal retries for a lost optimistic commit before
    /// `ConcurrencyConflict` is surfaced to the caller.
    pub max_commit_retries: u32,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        LedgerConfig {
            max_commit_retries: 3,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ReferralConfig {
    pub default_commission_rate_percent: f64,
}

impl Default for ReferralConfig {
    fn default() -> Self {
        ReferralConfig {
            default_commission_rate_percent: 5.0,  // 5%
        }
    }
}
