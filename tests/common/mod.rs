#![allow(dead_code)]

use std::sync::Mutex;

use budget_insight::{config::ConfigManager, ledger::Ledger};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub const YEAR: i32 = 2025;

pub fn date(month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(YEAR, month, day).expect("valid date")
}

/// Config manager rooted in a unique temporary directory.
pub fn setup_config_manager() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}

/// A year that runs short: income 3000 against 3150 of spending.
///
/// Rent is fixed, Salary is income, Food (130 + 520) and Entertainment (350)
/// are adjustable, so the overall deficit is 150.
pub fn deficit_ledger() -> Ledger {
    let mut ledger = Ledger::new(YEAR);
    ledger.add_transaction(date(1, 1), "Salary", 1500.0);
    ledger.add_transaction(date(1, 3), "Rent", -1100.0);
    ledger.add_transaction(date(1, 9), "Food", -130.0);
    ledger.add_transaction(date(2, 1), "Salary", 1500.0);
    ledger.add_transaction(date(2, 3), "Rent", -1050.0);
    ledger.add_transaction(date(2, 14), "Entertainment", -350.0);
    ledger.add_transaction(date(2, 21), "Food", -520.0);
    ledger
}
