#![doc(test(attr(deny(warnings))))]

//! Budget Insight derives yearly financial insight from a user's transactions:
//! monthly and category aggregates, deficit detection with reduction
//! proposals, spending reports, and what-if scenario comparison.

pub mod config;
pub mod core;
pub mod errors;
pub mod ledger;
pub mod simulation;
pub mod utils;

pub use crate::config::{ConfigManager, ExpenseClassifier, InsightConfig};
pub use crate::core::{DeficitResolver, ReportAnalyzer};
pub use crate::errors::{InsightError, Result};
pub use crate::ledger::{Ledger, Transaction};
pub use crate::simulation::ScenarioSimulator;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Budget Insight tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
