use tracing::{debug, info, warn};

use crate::{
    errors::{InsightError, Result},
    utils::closest_match,
};

use super::types::{
    Allocation, CategoryDelta, Scenario, ScenarioBase, ScenarioComparison, ScenarioSide,
    TotalsDelta,
};

/// Holds named what-if variants seeded from one base dataset.
///
/// A simulator without base data is uninitialized and refuses to create
/// scenarios until [`load_base`](Self::load_base) is called.
#[derive(Debug, Default)]
pub struct ScenarioSimulator {
    base: Option<ScenarioBase>,
    scenarios: Vec<Scenario>,
}

impl ScenarioSimulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_base(base: ScenarioBase) -> Self {
        let mut simulator = Self::new();
        simulator.load_base(base);
        simulator
    }

    /// Replaces the base used for scenarios created from now on.
    pub fn load_base(&mut self, base: ScenarioBase) {
        debug!(
            income_categories = base.income.len(),
            expense_categories = base.expenses.len(),
            "scenario base loaded"
        );
        self.base = Some(base);
    }

    /// True once a base with at least one category has been loaded.
    pub fn is_ready(&self) -> bool {
        self.base.as_ref().is_some_and(|base| !base.is_empty())
    }

    pub fn create_scenario(&mut self, name: &str) -> Result<&Scenario> {
        let base = match self.base.as_ref() {
            Some(base) if !base.is_empty() => base,
            Some(_) => {
                warn!(scenario = name, "scenario base holds no categories");
                return Err(InsightError::BaseDataUnavailable);
            }
            None => return Err(InsightError::BaseDataUnavailable),
        };
        if self.scenarios.iter().any(|scenario| scenario.name == name) {
            warn!(scenario = name, "scenario already exists");
            return Err(InsightError::DuplicateScenario(name.to_string()));
        }
        let scenario = Scenario::from_base(name, base);
        info!(scenario = name, id = %scenario.id, "scenario created");
        self.scenarios.push(scenario);
        Ok(&self.scenarios[self.scenarios.len() - 1])
    }

    pub fn apply_expense_change(&mut self, scenario: &str, category: &str, amount: f64) -> Result<()> {
        self.apply_change(scenario, ScenarioSide::Expense, category, amount)
    }

    pub fn apply_income_change(&mut self, scenario: &str, category: &str, amount: f64) -> Result<()> {
        self.apply_change(scenario, ScenarioSide::Income, category, amount)
    }

    fn apply_change(
        &mut self,
        name: &str,
        side: ScenarioSide,
        category: &str,
        amount: f64,
    ) -> Result<()> {
        let position = self.position(name)?;
        let scenario = &mut self.scenarios[position];
        if scenario.side_mut(side).set(category, amount) {
            debug!(scenario = name, %side, category, amount, "scenario value replaced");
            return Ok(());
        }
        let allocation = scenario.side(side);
        let suggestion = closest_match(category, allocation.categories().iter().map(String::as_str));
        warn!(scenario = name, %side, category, "scenario category not found");
        Err(InsightError::UnknownCategory {
            scenario: name.to_string(),
            category: category.to_string(),
            suggestion,
        })
    }

    pub fn compare_scenarios(&self, name_a: &str, name_b: &str) -> Result<ScenarioComparison> {
        let a = &self.scenarios[self.position(name_a)?];
        let b = &self.scenarios[self.position(name_b)?];

        let mut categories = side_deltas(ScenarioSide::Income, a.income(), b.income());
        categories.extend(side_deltas(ScenarioSide::Expense, a.expenses(), b.expenses()));

        Ok(ScenarioComparison {
            scenario_a: a.name.clone(),
            scenario_b: b.name.clone(),
            categories,
            income: TotalsDelta::between(a.total_income(), b.total_income()),
            expenses: TotalsDelta::between(a.total_expenses(), b.total_expenses()),
            net: TotalsDelta::between(a.net(), b.net()),
        })
    }

    pub fn scenario(&self, name: &str) -> Option<&Scenario> {
        self.scenarios.iter().find(|scenario| scenario.name == name)
    }

    /// Scenario names in creation order.
    pub fn scenario_names(&self) -> Vec<&str> {
        self.scenarios
            .iter()
            .map(|scenario| scenario.name.as_str())
            .collect()
    }

    pub fn remove_scenario(&mut self, name: &str) -> Result<Scenario> {
        let position = self.position(name)?;
        Ok(self.scenarios.remove(position))
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.scenarios
            .iter()
            .position(|scenario| scenario.name == name)
            .ok_or_else(|| {
                warn!(scenario = name, "scenario not found");
                InsightError::UnknownScenario(name.to_string())
            })
    }
}

/// Union of both sides' categories: A's order first, then categories only B has.
fn side_deltas(side: ScenarioSide, a: &Allocation, b: &Allocation) -> Vec<CategoryDelta> {
    let mut deltas: Vec<CategoryDelta> = a
        .iter()
        .map(|(category, value_a)| {
            let value_b = b.value(category).unwrap_or(0.0);
            CategoryDelta {
                category: category.to_string(),
                side,
                value_a,
                value_b,
                delta: value_b - value_a,
            }
        })
        .collect();
    for (category, value_b) in b.iter() {
        if a.position(category).is_none() {
            deltas.push(CategoryDelta {
                category: category.to_string(),
                side,
                value_a: 0.0,
                value_b,
                delta: value_b,
            });
        }
    }
    deltas
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> ScenarioBase {
        ScenarioBase::new(
            Allocation::new([("Salary", 3000.0)]),
            Allocation::new([("Food", 400.0), ("Travel", 250.0)]),
        )
    }

    #[test]
    fn uninitialized_simulator_refuses_scenarios() {
        let mut simulator = ScenarioSimulator::new();
        assert!(!simulator.is_ready());
        assert!(matches!(
            simulator.create_scenario("Plan"),
            Err(InsightError::BaseDataUnavailable)
        ));
    }

    #[test]
    fn empty_base_is_not_usable() {
        let mut simulator = ScenarioSimulator::with_base(ScenarioBase::default());
        assert!(!simulator.is_ready());
        assert!(matches!(
            simulator.create_scenario("X"),
            Err(InsightError::BaseDataUnavailable)
        ));
        assert!(simulator.scenario_names().is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut simulator = ScenarioSimulator::with_base(base());
        simulator.create_scenario("Plan").unwrap();
        assert!(matches!(
            simulator.create_scenario("Plan"),
            Err(InsightError::DuplicateScenario(ref name)) if name == "Plan"
        ));
        assert_eq!(simulator.scenario_names(), vec!["Plan"]);
    }

    #[test]
    fn unknown_category_suggests_close_name() {
        let mut simulator = ScenarioSimulator::with_base(base());
        simulator.create_scenario("Plan").unwrap();
        let err = simulator
            .apply_expense_change("Plan", "Fod", 10.0)
            .expect_err("Fod is not a category");
        assert!(matches!(
            err,
            InsightError::UnknownCategory { ref suggestion, .. } if suggestion.as_deref() == Some("Food")
        ));
        assert!(matches!(
            simulator.apply_income_change("Missing", "Salary", 1.0),
            Err(InsightError::UnknownScenario(_))
        ));
    }

    #[test]
    fn comparison_reports_category_and_total_deltas() {
        let mut simulator = ScenarioSimulator::with_base(base());
        simulator.create_scenario("Current").unwrap();
        simulator.create_scenario("Frugal").unwrap();
        simulator.apply_expense_change("Frugal", "Travel", 50.0).unwrap();
        simulator.apply_income_change("Frugal", "Salary", 3100.0).unwrap();

        let comparison = simulator.compare_scenarios("Current", "Frugal").unwrap();
        assert_eq!(comparison.income.delta, 100.0);
        assert_eq!(comparison.expenses.delta, -200.0);
        assert_eq!(comparison.net.delta, 300.0);
        let changed: Vec<&str> = comparison
            .changed()
            .map(|delta| delta.category.as_str())
            .collect();
        assert_eq!(changed, vec!["Salary", "Travel"]);
        assert_eq!(
            comparison.summary_lines().last().map(String::as_str),
            Some("Net: 2350.00 -> 2650.00 (+300.00)")
        );
    }

    #[test]
    fn removing_a_scenario_frees_its_name() {
        let mut simulator = ScenarioSimulator::with_base(base());
        simulator.create_scenario("Plan").unwrap();
        simulator.remove_scenario("Plan").unwrap();
        assert!(simulator.scenario("Plan").is_none());
        assert!(simulator.create_scenario("Plan").is_ok());
    }
}
