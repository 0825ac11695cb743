use crate::types::ids::{AccountId, InvestmentId, PlanId, ReferralId};
use tracing::Span;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber. Safe to call more than once.
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
        .ok();
}

pub fn ledger_commit_span(account_id: &AccountId) -> Span {
    tracing::info_span!(
        "ledger_commit",
        account_id = %account_id,
    )
}

pub fn investment_open_span(plan_id: &PlanId) -> Span {
    tracing::info_span!(
        "investment_open",
        plan_id = %plan_id,
    )
}

pub fn investment_close_span(investment_id: &InvestmentId) -> Span {
    tracing::info_span!(
        "investment_close",
        investment_id = %investment_id,
    )
}

pub fn referral_accrual_span(referral_id: &ReferralId) -> Span {
    tracing::info_span!(
        "referral_accrual",
        referral_id = %referral_id,
    )
}
