//! Named what-if scenarios over category-level allocations.

pub mod engine;
pub mod types;

pub use engine::ScenarioSimulator;
pub use types::{
    Allocation, CategoryDelta, Scenario, ScenarioBase, ScenarioComparison, ScenarioSide,
    TotalsDelta,
};

use crate::{config::ExpenseClassifier, ledger::Ledger};

impl Ledger {
    /// Category-level income and expense totals used to seed scenarios.
    pub fn scenario_base<C: ExpenseClassifier + ?Sized>(&self, classifier: &C) -> ScenarioBase {
        ScenarioBase::from_entries(self.transactions(), classifier)
    }
}
