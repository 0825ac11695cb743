use crate::types::ids::UserId;
use lazy_static::lazy_static;
use uuid::Uuid;

pub mod commission;
pub mod config;
pub mod error;
pub mod interfaces;
pub mod invariants;
pub mod investment;
pub mod ledger;
pub mod observability;
pub mod referral;
pub mod types;
pub mod utils;

lazy_static! {
    // Use lazy_static for UserId to ensure const compatibility
    pub static ref TREASURY_USER_ID: UserId = UserId(Uuid::from_u128(0));
}

// Audit export format version
pub const AUDIT_EXPORT_VERSION: u32 = 1;
