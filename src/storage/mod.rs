pub mod json_backend;
pub mod memory;

use crate::{
    domain::{DateZone, StoredTransaction, TransactionRecord, UserIdentity},
    errors::FinanceError,
};

pub type Result<T> = std::result::Result<T, FinanceError>;

/// Namespace shared by every key the app writes.
pub const KEY_NAMESPACE: &str = "@gofinances";

/// Global transactions key used before transactions were stored per user.
pub const LEGACY_TRANSACTIONS_KEY: &str = "@gofinances:transactions";

/// Abstraction over on-device key-value persistence holding opaque string blobs.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// Per-user transactions key, e.g. `@gofinances:transactions_user:12345`.
pub fn transactions_key(user: &UserIdentity) -> String {
    format!("{}:transactions_user:{}", KEY_NAMESPACE, user.id)
}

/// Reads and decodes the transaction list stored under `key`, resolving
/// timestamps to calendar dates in `zone`.
///
/// An absent key is an empty list; a present blob that does not decode is
/// [`FinanceError::CorruptData`].
pub fn load_transactions(
    store: &dyn KeyValueStore,
    key: &str,
    zone: DateZone,
) -> Result<Vec<TransactionRecord>> {
    load_stored(store, key)?
        .into_iter()
        .map(|stored| stored.into_record(zone))
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|reason| {
            tracing::error!(key, %reason, "stored transaction has an unreadable date");
            FinanceError::corrupt(key, reason)
        })
}

pub fn save_transactions(
    store: &dyn KeyValueStore,
    key: &str,
    records: &[TransactionRecord],
) -> Result<()> {
    let blob = serde_json::to_string(records).map_err(|err| FinanceError::corrupt(key, err))?;
    store.set(key, &blob)
}

/// Appends one record to the stored list; refuses to overwrite a corrupt blob.
///
/// Entries already stored are written back exactly as they were read.
pub fn append_transaction(
    store: &dyn KeyValueStore,
    key: &str,
    record: TransactionRecord,
) -> Result<usize> {
    let mut entries = load_stored(store, key)?;
    if let Some(bad) = entries.iter().find(|entry| !entry.has_valid_date()) {
        return Err(FinanceError::corrupt(
            key,
            format!("transaction {} has invalid date `{}`", bad.id, bad.date),
        ));
    }
    if entries.iter().any(|existing| existing.id == record.id) {
        return Err(FinanceError::InvalidInput(format!(
            "transaction {} already stored under `{}`",
            record.id, key
        )));
    }
    entries.push(StoredTransaction::from(record));
    let blob = serde_json::to_string(&entries).map_err(|err| FinanceError::corrupt(key, err))?;
    store.set(key, &blob)?;
    Ok(entries.len())
}

fn load_stored(store: &dyn KeyValueStore, key: &str) -> Result<Vec<StoredTransaction>> {
    let Some(blob) = store.get(key)? else {
        tracing::debug!(key, "no transactions stored yet");
        return Ok(Vec::new());
    };
    serde_json::from_str(&blob).map_err(|err| {
        tracing::error!(key, error = %err, "stored transactions failed to decode");
        FinanceError::corrupt(key, err)
    })
}

pub use json_backend::JsonFileStore;
pub use memory::MemoryStore;
