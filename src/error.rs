use crate::types::amount::Amount;
use crate::types::ids::{AccountId, InvestmentId, PlanId, ReferralId};
use crate::types::timestamp::Timestamp;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    // Validation Errors
    #[error("Invalid amount: {0}")]
    InvalidAmount(Amount),

    #[error("Missing withdrawal destination")]
    MissingDestination,

    #[error("Invalid duration: a plan must run for at least one day")]
    InvalidDuration,

    #[error("Invalid plan bounds: min={min}, max={max}")]
    InvalidPlanBounds {
        min: Amount,
        max: Amount,
    },

    // Ledger Errors
    #[error("Account not found: {0:?}")]
    AccountNotFound(AccountId),

    #[error("Account already exists: {0:?}")]
    AccountAlreadyExists(AccountId),

    #[error("Insufficient funds: requested={requested}, available={available}")]
    InsufficientFunds {
        requested: Amount,
        available: Amount,
    },

    #[error("Concurrency conflict on account {0:?}: commit retries exhausted")]
    ConcurrencyConflict(AccountId),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Reconciliation failed: expected={expected}, actual={actual}")]
    ReconciliationFailed {
        expected: Amount,
        actual: Amount,
    },

    // Investment Errors
    #[error("Plan not found: {0:?}")]
    PlanNotFound(PlanId),

    #[error("Plan inactive: {0:?}")]
    PlanInactive(PlanId),

    #[error("Amount below plan minimum: amount={amount}, minimum={minimum}")]
    AmountBelowMinimum {
        amount: Amount,
        minimum: Amount,
    },

    #[error("Amount above plan maximum: amount={amount}, maximum={maximum}")]
    AmountAboveMaximum {
        amount: Amount,
        maximum: Amount,
    },

    #[error("Investment not found: {0:?}")]
    InvestmentNotFound(InvestmentId),

    #[error("Investment not matured: {investment_id:?} matures at {maturity}")]
    InvestmentNotMatured {
        investment_id: InvestmentId,
        maturity: Timestamp,
    },

    #[error("Investment already closed: {0:?}")]
    InvestmentAlreadyClosed(InvestmentId),

    // Referral Errors
    #[error("Referral not found: {0:?}")]
    ReferralNotFound(ReferralId),

    #[error("Referral inactive: {0:?}")]
    ReferralInactive(ReferralId),

    // Invariant Errors
    #[error("Invariant violation: {0}")]
    InvariantViolation(InvariantViolation),

    // System Errors
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Overflow in {operation}")]
    Overflow {
        operation: String,
    },

    // IO Errors
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone)]
pub struct InvariantViolation {
    pub invariant: &'static str,
    pub details: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.invariant, self.details)
    }
}
