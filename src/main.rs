use anyhow::Result;
use std::sync::Arc;
use wallet_engine::TREASURY_USER_ID;
use wallet_engine::config::loader::AppConfig;
use wallet_engine::interfaces::ledger_store::LedgerStore;
use wallet_engine::investment::accrual::InvestmentEngine;
use wallet_engine::investment::plan::InvestmentPlan;
use wallet_engine::ledger::store::MemoryLedgerStore;
use wallet_engine::ledger::wallet::WalletLedger;
use wallet_engine::referral::commission::ReferralEngine;
use wallet_engine::types::amount::Amount;
use wallet_engine::types::ids::UserId;
use wallet_engine::types::rate::Rate;
use wallet_engine::types::timestamp::Timestamp;

fn main() -> Result<()> {
    wallet_engine::observability::tracing::init();

    let config = AppConfig::load("dev").unwrap_or_default();
    let store = Arc::new(MemoryLedgerStore::with_config(config.ledger.clone()));
    store.create_account(*TREASURY_USER_ID)?;

    let wallet = WalletLedger::new(Arc::clone(&store));

    // Demo flow: fund a wallet, open a position, accrue a referral.
    let user_id = UserId::new();
    let account = store.create_account(user_id)?;
    let receipt = wallet.deposit(account.account_id, Amount::from_i64(500_000), "card", None)?;
    tracing::info!(balance = %receipt.balance, "wallet funded");

    let investments = InvestmentEngine::new(wallet.clone());
    let plan = InvestmentPlan::new(
        "90-day growth",
        Amount::from_i64(10_000),
        None,
        Rate::from_percent(12.0),
        90,
    )?;
    let plan_id = investments.register_plan(plan);
    let opened = investments.open(user_id, plan_id, Amount::from_i64(100_000))?;
    let view = opened.investment.value_at(Timestamp::now());
    tracing::info!(
        expected_return = %opened.investment.expected_return,
        current_value = %view.current_value,
        "position opened"
    );

    let referrals = ReferralEngine::new(Arc::clone(&store));
    let referrer_id = UserId::new();
    store.create_account(referrer_id)?;
    let referral = referrals.register(
        referrer_id,
        user_id,
        Rate::from_percent(config.referral.default_commission_rate_percent),
    );
    let accrued = referrals.accrue(referral.referral_id, Amount::from_i64(200_000), "order-1001")?;
    tracing::info!(commission = %accrued.commission, "referral commission accrued");

    Ok(())
}
