use serde::{Deserialize, Serialize};

use crate::core::aggregator;
use crate::ledger::{Ledger, LedgerEntry};

/// Year-level figures a [`DeficitResolver`](super::DeficitResolver) is built from.
pub trait YearDataSource {
    fn total_income(&self) -> f64;
    /// Sum of expense-side amounts; zero or negative.
    fn total_expenses(&self) -> f64;
    /// Category and signed amount of every transaction in the year.
    fn category_amounts(&self) -> Vec<(&str, f64)>;
}

/// Owned copy of a full-year dataset, independent of any live ledger.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearSnapshot {
    total_income: f64,
    total_expenses: f64,
    categories: Vec<String>,
    amounts: Vec<f64>,
}

impl YearSnapshot {
    pub fn new<I, S>(total_income: f64, total_expenses: f64, entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let (categories, amounts) = entries
            .into_iter()
            .map(|(category, amount)| (category.into(), amount))
            .unzip();
        Self {
            total_income,
            total_expenses,
            categories,
            amounts,
        }
    }

    /// Derives the totals from the entries themselves.
    pub fn from_entries<E: LedgerEntry>(entries: &[E]) -> Self {
        let summary = aggregator::annual_summary(entries);
        Self::new(
            summary.total_income,
            summary.total_expenses,
            entries
                .iter()
                .map(|entry| (entry.category().to_string(), entry.amount())),
        )
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }
}

impl YearDataSource for YearSnapshot {
    fn total_income(&self) -> f64 {
        self.total_income
    }

    fn total_expenses(&self) -> f64 {
        self.total_expenses
    }

    fn category_amounts(&self) -> Vec<(&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.amounts.iter().copied())
            .collect()
    }
}

impl Ledger {
    /// Owned copy of this year's figures, unaffected by later edits.
    pub fn year_snapshot(&self) -> YearSnapshot {
        YearSnapshot::from_entries(self.transactions())
    }
}

impl YearDataSource for Ledger {
    fn total_income(&self) -> f64 {
        self.calculate_annual_summary().total_income
    }

    fn total_expenses(&self) -> f64 {
        self.calculate_annual_summary().total_expenses
    }

    fn category_amounts(&self) -> Vec<(&str, f64)> {
        self.transactions()
            .iter()
            .map(|txn| (txn.category.as_str(), txn.amount))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn snapshot_from_ledger_matches_ledger_source() {
        let mut ledger = Ledger::new(2025);
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        ledger.add_transaction(day, "Pay", 500.0);
        ledger.add_transaction(day, "Food", -120.0);

        let snapshot = ledger.year_snapshot();
        assert_eq!(snapshot.total_income(), ledger.total_income());
        assert_eq!(snapshot.total_expenses(), ledger.total_expenses());
        assert_eq!(snapshot.category_amounts(), ledger.category_amounts());
        assert_eq!(snapshot.categories().len(), snapshot.amounts().len());
    }
}
