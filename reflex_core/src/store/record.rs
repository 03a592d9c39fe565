use reflex_schema::{GameRecord, LEGACY_HISTORY_KEY, RECORD_KEY};

use super::KeyValueStore;
use crate::error::StoreError;

/// Loads the record, falling back to the zero value on any failure.
///
/// A legacy bare-array history is deleted, never merged.
pub fn load_record<S: KeyValueStore + ?Sized>(store: &mut S) -> GameRecord {
    discard_legacy_history(store);

    let raw = match store.get(RECORD_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return GameRecord::default(),
        Err(e) => {
            log::warn!("failed to read game record, starting fresh: {e}");
            return GameRecord::default();
        }
    };

    match serde_json::from_str::<GameRecord>(&raw) {
        Ok(record) if record.is_consistent() => record,
        Ok(record) => {
            log::warn!(
                "repairing inconsistent game record (total_games={}, history={}, early_taps={})",
                record.total_games,
                record.history.len(),
                record.early_taps
            );
            record.sanitized()
        }
        Err(e) => {
            log::warn!("malformed game record, starting fresh: {e}");
            GameRecord::default()
        }
    }
}

pub fn save_record<S: KeyValueStore + ?Sized>(
    store: &mut S,
    record: &GameRecord,
) -> Result<(), StoreError> {
    let raw = serde_json::to_string(record)?;
    store.set(RECORD_KEY, &raw)
}

pub fn clear_record<S: KeyValueStore + ?Sized>(store: &mut S) -> Result<(), StoreError> {
    store.remove(RECORD_KEY)?;
    store.remove(LEGACY_HISTORY_KEY)
}

fn discard_legacy_history<S: KeyValueStore + ?Sized>(store: &mut S) {
    let raw = match store.get(LEGACY_HISTORY_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return,
        Err(e) => {
            log::warn!("failed to inspect legacy history: {e}");
            return;
        }
    };

    let is_array = matches!(
        serde_json::from_str::<serde_json::Value>(&raw),
        Ok(serde_json::Value::Array(_))
    );
    if !is_array {
        return;
    }

    match store.remove(LEGACY_HISTORY_KEY) {
        Ok(()) => log::info!("discarded legacy reaction history"),
        Err(e) => log::warn!("failed to remove legacy history: {e}"),
    }
}
