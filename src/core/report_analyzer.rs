//! Year-scoped analytical queries over a read-only record snapshot.

use std::{collections::BTreeSet, fmt};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{
    core::aggregator,
    ledger::{month_name, LedgerEntry, Transaction},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryKind {
    Income,
    Expense,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            EntryKind::Income => "Income",
            EntryKind::Expense => "Expense",
        };
        f.write_str(label)
    }
}

/// A record tagged with its period and an explicit income/expense flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub year: i32,
    pub month: u32,
    pub category: String,
    pub amount: f64,
    pub kind: EntryKind,
}

impl ReportRecord {
    pub fn new(
        year: i32,
        month: u32,
        category: impl Into<String>,
        amount: f64,
        kind: EntryKind,
    ) -> Self {
        Self {
            year,
            month,
            category: category.into(),
            amount,
            kind,
        }
    }

    pub fn from_transaction(txn: &Transaction) -> Self {
        let kind = if txn.amount > 0.0 {
            EntryKind::Income
        } else {
            EntryKind::Expense
        };
        Self::new(
            txn.year(),
            txn.month().unwrap_or_default(),
            txn.category.clone(),
            txn.amount,
            kind,
        )
    }

    /// The flag must agree with the amount's sign; zero agrees with either.
    pub fn is_consistent(&self) -> bool {
        match self.kind {
            EntryKind::Income => self.amount >= 0.0,
            EntryKind::Expense => self.amount <= 0.0,
        }
    }
}

impl LedgerEntry for ReportRecord {
    fn month(&self) -> Option<u32> {
        (1..=12).contains(&self.month).then_some(self.month)
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn amount(&self) -> f64 {
        self.amount
    }
}

/// Outcome of a "largest spend" query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Finding<T> {
    /// The year has no records at all.
    NoData,
    /// Records exist but none of them is a negative-amount expense.
    NoExpenseData,
    Found(T),
}

impl<T> Finding<T> {
    pub fn found(&self) -> Option<&T> {
        match self {
            Finding::Found(value) => Some(value),
            _ => None,
        }
    }
}

impl<T: fmt::Display> fmt::Display for Finding<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::NoData => f.write_str("No data available for the selected year."),
            Finding::NoExpenseData => f.write_str("No expense data available for the selected year."),
            Finding::Found(value) => fmt::Display::fmt(value, f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthSpend {
    pub month: u32,
    pub total: f64,
}

impl fmt::Display for MonthSpend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.2}",
            month_name(self.month).unwrap_or("Unknown"),
            self.total
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub category: String,
    pub total: f64,
}

impl fmt::Display for CategorySpend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {:.2}", self.category, self.total)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthBalance {
    pub month: u32,
    pub income: f64,
    /// Sum of expense amounts, zero or negative.
    pub expenses: f64,
    pub balance: f64,
}

impl MonthBalance {
    pub fn deficit(&self) -> f64 {
        if self.balance < 0.0 {
            self.balance.abs()
        } else {
            0.0
        }
    }
}

impl fmt::Display for MonthBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = month_name(self.month).unwrap_or("Unknown");
        if self.balance < 0.0 {
            write!(f, "{}: deficit of {:.2}", name, self.deficit())
        } else {
            write!(f, "{}: balance of {:.2}", name, self.balance)
        }
    }
}

pub struct ReportAnalyzer {
    records: Vec<ReportRecord>,
    rejected: usize,
}

impl ReportAnalyzer {
    /// Keeps only records whose kind flag agrees with the amount's sign.
    pub fn new(records: Vec<ReportRecord>) -> Self {
        let total = records.len();
        let records: Vec<ReportRecord> = records
            .into_iter()
            .filter(|record| {
                let consistent = record.is_consistent();
                if !consistent {
                    warn!(
                        year = record.year,
                        month = record.month,
                        category = %record.category,
                        amount = record.amount,
                        kind = %record.kind,
                        "excluding record whose kind contradicts its amount"
                    );
                }
                consistent
            })
            .collect();
        let rejected = total - records.len();
        debug!(accepted = records.len(), rejected, "report analyzer prepared");
        Self { records, rejected }
    }

    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        Self::new(
            transactions
                .iter()
                .map(ReportRecord::from_transaction)
                .collect(),
        )
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected
    }

    pub fn records(&self) -> &[ReportRecord] {
        &self.records
    }

    /// Distinct years present, ascending.
    pub fn years(&self) -> Vec<i32> {
        self.records
            .iter()
            .map(|record| record.year)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    fn records_for_year(&self, year: i32) -> Vec<&ReportRecord> {
        self.records
            .iter()
            .filter(|record| record.year == year)
            .collect()
    }

    /// Month with the most negative expense total; earliest month wins ties.
    pub fn find_highest_spending_month(&self, year: i32) -> Finding<MonthSpend> {
        let records = self.records_for_year(year);
        if records.is_empty() {
            return Finding::NoData;
        }
        let totals = aggregator::expense_totals_by_month(&records);
        let mut best: Option<MonthSpend> = None;
        for (month, total) in totals.iter() {
            if total < 0.0 && best.map_or(true, |current| total < current.total) {
                best = Some(MonthSpend { month, total });
            }
        }
        best.map_or(Finding::NoExpenseData, Finding::Found)
    }

    /// Category with the most negative expense total; first-seen category wins ties.
    pub fn find_top_spending_category(&self, year: i32) -> Finding<CategorySpend> {
        let records = self.records_for_year(year);
        if records.is_empty() {
            return Finding::NoData;
        }
        let totals = aggregator::expense_totals_by_category(&records);
        let mut best: Option<(&str, f64)> = None;
        for (category, total) in totals.iter() {
            let total = *total;
            if total < 0.0 && best.map_or(true, |(_, current)| total < current) {
                best = Some((category, total));
            }
        }
        match best {
            Some((category, total)) => Finding::Found(CategorySpend {
                category: category.to_string(),
                total,
            }),
            None => Finding::NoExpenseData,
        }
    }

    /// Income, expenses, and balance for each month of `year`, January first.
    pub fn monthly_balances(&self, year: i32) -> Vec<MonthBalance> {
        let records = self.records_for_year(year);
        let income = aggregator::income_totals_by_month(&records);
        let expenses = aggregator::expense_totals_by_month(&records);
        income
            .iter()
            .zip(expenses.iter())
            .map(|((month, income), (_, expenses))| MonthBalance {
                month,
                income,
                expenses,
                balance: income + expenses,
            })
            .collect()
    }

    /// Every month of `year` whose balance is below zero.
    pub fn list_negative_balance_months(&self, year: i32) -> Vec<MonthBalance> {
        self.monthly_balances(year)
            .into_iter()
            .filter(|month| month.balance < 0.0)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(year: i32, month: u32, category: &str, amount: f64) -> ReportRecord {
        ReportRecord::new(year, month, category, amount, EntryKind::Expense)
    }

    fn income(year: i32, month: u32, category: &str, amount: f64) -> ReportRecord {
        ReportRecord::new(year, month, category, amount, EntryKind::Income)
    }

    #[test]
    fn empty_year_reports_no_data() {
        let analyzer = ReportAnalyzer::new(vec![expense(2024, 1, "Food", -5.0)]);
        assert_eq!(analyzer.find_highest_spending_month(2025), Finding::NoData);
        assert_eq!(analyzer.find_top_spending_category(2025), Finding::NoData);
        assert!(analyzer.list_negative_balance_months(2025).is_empty());
    }

    #[test]
    fn income_only_year_reports_no_expense_data() {
        let analyzer = ReportAnalyzer::new(vec![income(2025, 2, "Pay", 100.0)]);
        assert_eq!(
            analyzer.find_highest_spending_month(2025),
            Finding::NoExpenseData
        );
        assert_eq!(
            analyzer.find_top_spending_category(2025).to_string(),
            "No expense data available for the selected year."
        );
    }

    #[test]
    fn ties_keep_the_first_minimum() {
        let analyzer = ReportAnalyzer::new(vec![
            expense(2025, 5, "Travel", -100.0),
            expense(2025, 2, "Food", -100.0),
            expense(2025, 7, "Fuel", -40.0),
        ]);
        assert_eq!(
            analyzer.find_highest_spending_month(2025),
            Finding::Found(MonthSpend {
                month: 2,
                total: -100.0
            })
        );
        assert_eq!(
            analyzer.find_top_spending_category(2025),
            Finding::Found(CategorySpend {
                category: "Travel".into(),
                total: -100.0
            })
        );
    }

    #[test]
    fn inconsistent_records_are_excluded() {
        let analyzer = ReportAnalyzer::new(vec![
            income(2025, 1, "Pay", -50.0),
            expense(2025, 1, "Food", 20.0),
            expense(2025, 1, "Food", -20.0),
        ]);
        assert_eq!(analyzer.rejected_count(), 2);
        assert_eq!(analyzer.records().len(), 1);
    }

    #[test]
    fn negative_months_carry_absolute_deficit() {
        let analyzer = ReportAnalyzer::new(vec![
            income(2025, 3, "Pay", 100.0),
            expense(2025, 3, "Rent", -220.0),
            income(2025, 4, "Pay", 300.0),
            expense(2025, 4, "Food", -20.0),
        ]);
        let negative = analyzer.list_negative_balance_months(2025);
        assert_eq!(negative.len(), 1);
        assert_eq!(negative[0].month, 3);
        assert_eq!(negative[0].deficit(), 120.0);
        assert_eq!(negative[0].to_string(), "March: deficit of 120.00");
    }

    #[test]
    fn records_from_transactions_derive_kind_from_sign() {
        let day = chrono::NaiveDate::from_ymd_opt(2025, 8, 2).unwrap();
        let analyzer = ReportAnalyzer::from_transactions(&[
            Transaction::new(day, "Pay", 10.0),
            Transaction::new(day, "Food", -4.0),
        ]);
        assert_eq!(analyzer.rejected_count(), 0);
        assert_eq!(analyzer.records()[0].kind, EntryKind::Income);
        assert_eq!(analyzer.records()[1].kind, EntryKind::Expense);
        assert_eq!(analyzer.years(), vec![2025]);
    }
}
