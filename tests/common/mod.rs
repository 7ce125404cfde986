#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::NaiveDate;
use gofinances_core::{
    config::ConfigManager,
    domain::{Direction, Session, TransactionRecord, UserIdentity},
    storage::JsonFileStore,
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated base directory for each test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// File-backed store and config manager rooted in a fresh temp directory.
pub fn setup_test_env() -> (JsonFileStore, ConfigManager) {
    let base = temp_base();
    let store = JsonFileStore::new(base.join("store")).expect("create json file store");
    let config = ConfigManager::with_base_dir(base).expect("create config manager for temp dir");
    (store, config)
}

pub fn session() -> Session {
    Session::new(UserIdentity::new("12345", "Paulo Gouvêa", "paulo@email.com"))
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn outgoing(amount: &str, category: &str, day: NaiveDate) -> TransactionRecord {
    TransactionRecord::new("expense", amount, Direction::Outgoing, category, day)
}

pub fn incoming(amount: &str, category: &str, day: NaiveDate) -> TransactionRecord {
    TransactionRecord::new("income", amount, Direction::Incoming, category, day)
}
