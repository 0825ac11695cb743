use crate::error::Result;
use crate::ledger::store::MemoryLedgerStore;
use crate::types::ids::{EntryId, InvestmentId};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Get current timestamp in milliseconds since epoch
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_millis() as u64
}

/// Generate a new ledger entry ID
pub fn generate_entry_id() -> EntryId {
    EntryId(Uuid::new_v4())
}

/// Generate a new investment ID
pub fn generate_investment_id() -> InvestmentId {
    InvestmentId(Uuid::new_v4())
}

/// Write every account and committed entry to a JSON file, for audit and
/// offline reconciliation.
pub fn export_ledger_audit(store: &MemoryLedgerStore, path: &Path) -> Result<()> {
    let dump = serde_json::json!({
        "version": crate::AUDIT_EXPORT_VERSION,
        "exported_at": current_timestamp_ms(),
        "accounts": store.accounts(),
        "entries": store.all_entries(),
    });

    let mut file = File::create(path)?;
    file.write_all(dump.to_string().as_bytes())?;
    tracing::info!(path = %path.display(), "ledger audit export written");
    Ok(())
}
