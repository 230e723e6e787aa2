//! Aggregate value types handed to report formatters.

use serde::{Deserialize, Serialize};

use crate::utils::approx_eq;

pub const MONTHS_PER_YEAR: usize = 12;

pub const MONTH_NAMES: [&str; MONTHS_PER_YEAR] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Returns the English name for a 1-based month number.
pub fn month_name(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    MONTH_NAMES.get(index).copied()
}

/// Signed per-month totals, index 0 = January.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MonthlyTotals(pub [f64; MONTHS_PER_YEAR]);

impl MonthlyTotals {
    /// Returns the total for a 1-based month number.
    pub fn month(&self, month: u32) -> Option<f64> {
        let index = usize::try_from(month).ok()?.checked_sub(1)?;
        self.0.get(index).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, f64)> + '_ {
        self.0
            .iter()
            .enumerate()
            .map(|(index, total)| (index as u32 + 1, *total))
    }

    pub fn sum(&self) -> f64 {
        self.0.iter().sum()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn labels() -> [&'static str; MONTHS_PER_YEAR] {
        MONTH_NAMES
    }
}

/// Yearly income/expense split.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AnnualSummary {
    pub total_income: f64,
    pub total_expenses: f64,
    pub net_balance: f64,
}

impl AnnualSummary {
    pub fn new(total_income: f64, total_expenses: f64) -> Self {
        Self {
            total_income,
            total_expenses,
            net_balance: total_income + total_expenses,
        }
    }

    /// Shortfall of income against all expenses, never negative.
    pub fn shortfall(&self) -> f64 {
        (-self.net_balance).max(0.0)
    }

    pub fn is_balanced(&self) -> bool {
        approx_eq(self.net_balance, 0.0)
    }
}

/// Transactions sharing one category, with their signed total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryGroup<T> {
    pub transactions: Vec<T>,
    pub total: f64,
}

impl<T> Default for CategoryGroup<T> {
    fn default() -> Self {
        Self {
            transactions: Vec::new(),
            total: 0.0,
        }
    }
}

impl<T> CategoryGroup<T> {
    pub fn push(&mut self, item: T, amount: f64) {
        self.transactions.push(item);
        self.total += amount;
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_name_is_one_based() {
        assert_eq!(month_name(1), Some("January"));
        assert_eq!(month_name(12), Some("December"));
        assert_eq!(month_name(0), None);
        assert_eq!(month_name(13), None);
    }

    #[test]
    fn annual_summary_derives_net_and_shortfall() {
        let summary = AnnualSummary::new(1000.0, -1250.0);
        assert_eq!(summary.net_balance, -250.0);
        assert_eq!(summary.shortfall(), 250.0);
        assert_eq!(AnnualSummary::new(10.0, -4.0).shortfall(), 0.0);
    }

    #[test]
    fn monthly_totals_index_by_calendar_month() {
        let mut totals = MonthlyTotals::default();
        totals.0[1] = -80.0;
        assert_eq!(totals.month(2), Some(-80.0));
        assert_eq!(totals.month(0), None);
        assert_eq!(totals.iter().nth(1), Some((2, -80.0)));
    }
}
