//! Ledger domain models and aggregate value types.

#[allow(clippy::module_inception)]
pub mod ledger;
pub mod ordered;
pub mod summary;
pub mod transaction;

pub use ledger::Ledger;
pub use ordered::OrderedGroups;
pub use summary::{
    month_name, AnnualSummary, CategoryGroup, MonthlyTotals, MONTHS_PER_YEAR, MONTH_NAMES,
};
pub use transaction::{LedgerEntry, Transaction};
