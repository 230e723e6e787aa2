use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::ExpenseClassifier,
    ledger::{LedgerEntry, OrderedGroups},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioSide {
    Income,
    Expense,
}

impl fmt::Display for ScenarioSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ScenarioSide::Income => "Income",
            ScenarioSide::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// Index-aligned category names and values for one side of a scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    categories: Vec<String>,
    values: Vec<f64>,
}

impl Allocation {
    pub fn new<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (categories, values) = pairs
            .into_iter()
            .map(|(category, value)| (category.into(), value))
            .unzip();
        Self { categories, values }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Position of `category`, preferring an exact match over a case-insensitive one.
    pub fn position(&self, category: &str) -> Option<usize> {
        self.categories
            .iter()
            .position(|name| name == category)
            .or_else(|| {
                self.categories
                    .iter()
                    .position(|name| name.eq_ignore_ascii_case(category))
            })
    }

    pub fn value(&self, category: &str) -> Option<f64> {
        self.position(category).map(|index| self.values[index])
    }

    pub(crate) fn set(&mut self, category: &str, value: f64) -> bool {
        match self.position(category) {
            Some(index) => {
                self.values[index] = value;
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Category-level totals every scenario is seeded from.
///
/// Expense values are positive spend magnitudes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScenarioBase {
    pub income: Allocation,
    pub expenses: Allocation,
}

impl ScenarioBase {
    pub fn new(income: Allocation, expenses: Allocation) -> Self {
        Self { income, expenses }
    }

    /// Sums positive entries into income and negative entries into expenses.
    ///
    /// A negative entry in an income category (a clawback) is netted into
    /// that income category, so income minus expenses always equals the sum
    /// of the entries.
    pub fn from_entries<E, C>(entries: &[E], classifier: &C) -> Self
    where
        E: LedgerEntry,
        C: ExpenseClassifier + ?Sized,
    {
        let mut income: OrderedGroups<f64> = OrderedGroups::new();
        let mut expenses: OrderedGroups<f64> = OrderedGroups::new();
        for entry in entries {
            let amount = entry.amount();
            let category = entry.category();
            if amount > 0.0 || (amount < 0.0 && !classifier.is_expense_category(category)) {
                *income.entry_or_insert_with(category, || 0.0) += amount;
            } else if amount < 0.0 {
                *expenses.entry_or_insert_with(category, || 0.0) += -amount;
            }
        }
        Self::new(Allocation::new(income), Allocation::new(expenses))
    }

    pub fn is_empty(&self) -> bool {
        self.income.is_empty() && self.expenses.is_empty()
    }
}

/// A named what-if copy of the base allocations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    income: Allocation,
    expenses: Allocation,
}

impl Scenario {
    pub fn from_base(name: impl Into<String>, base: &ScenarioBase) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            created_at: Utc::now(),
            income: base.income.clone(),
            expenses: base.expenses.clone(),
        }
    }

    pub fn income(&self) -> &Allocation {
        &self.income
    }

    pub fn expenses(&self) -> &Allocation {
        &self.expenses
    }

    pub fn side(&self, side: ScenarioSide) -> &Allocation {
        match side {
            ScenarioSide::Income => &self.income,
            ScenarioSide::Expense => &self.expenses,
        }
    }

    pub(crate) fn side_mut(&mut self, side: ScenarioSide) -> &mut Allocation {
        match side {
            ScenarioSide::Income => &mut self.income,
            ScenarioSide::Expense => &mut self.expenses,
        }
    }

    pub fn total_income(&self) -> f64 {
        self.income.total()
    }

    pub fn total_expenses(&self) -> f64 {
        self.expenses.total()
    }

    pub fn net(&self) -> f64 {
        self.total_income() - self.total_expenses()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub category: String,
    pub side: ScenarioSide,
    pub value_a: f64,
    pub value_b: f64,
    /// `value_b - value_a`.
    pub delta: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TotalsDelta {
    pub value_a: f64,
    pub value_b: f64,
    pub delta: f64,
}

impl TotalsDelta {
    pub(crate) fn between(value_a: f64, value_b: f64) -> Self {
        Self {
            value_a,
            value_b,
            delta: value_b - value_a,
        }
    }
}

/// Differences from scenario A to scenario B.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub scenario_a: String,
    pub scenario_b: String,
    pub categories: Vec<CategoryDelta>,
    pub income: TotalsDelta,
    pub expenses: TotalsDelta,
    pub net: TotalsDelta,
}

impl ScenarioComparison {
    /// Categories whose value differs between the two scenarios.
    pub fn changed(&self) -> impl Iterator<Item = &CategoryDelta> {
        self.categories.iter().filter(|delta| delta.delta != 0.0)
    }

    pub fn summary_lines(&self) -> Vec<String> {
        let mut lines = vec![format!(
            "Comparing `{}` to `{}`",
            self.scenario_a, self.scenario_b
        )];
        for delta in &self.categories {
            lines.push(format!(
                "- {} {}: {:.2} -> {:.2} ({:+.2})",
                delta.side, delta.category, delta.value_a, delta.value_b, delta.delta
            ));
        }
        for (label, totals) in [
            ("Total income", &self.income),
            ("Total expenses", &self.expenses),
            ("Net", &self.net),
        ] {
            lines.push(format!(
                "{}: {:.2} -> {:.2} ({:+.2})",
                label, totals.value_a, totals.value_b, totals.delta
            ));
        }
        lines
    }
}
