use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Typed accessors every analyzable record exposes.
///
/// Aggregation only ever reads records through this contract, so ledger
/// transactions and report snapshots share the same grouping code.
pub trait LedgerEntry {
    /// Calendar month in `1..=12`, or `None` when it cannot be derived.
    fn month(&self) -> Option<u32>;
    fn category(&self) -> &str;
    /// Signed amount: positive is income, negative is expense.
    fn amount(&self) -> f64;
    fn merchant(&self) -> Option<&str> {
        None
    }

    fn is_income(&self) -> bool {
        self.amount() > 0.0
    }

    fn is_expense(&self) -> bool {
        self.amount() < 0.0
    }
}

impl<T: LedgerEntry + ?Sized> LedgerEntry for &T {
    fn month(&self) -> Option<u32> {
        (**self).month()
    }

    fn category(&self) -> &str {
        (**self).category()
    }

    fn amount(&self) -> f64 {
        (**self).amount()
    }

    fn merchant(&self) -> Option<&str> {
        (**self).merchant()
    }
}

/// A single dated income or expense entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    pub category: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
}

impl Transaction {
    pub fn new(date: NaiveDate, category: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            category: category.into(),
            amount,
            merchant: None,
        }
    }

    pub fn with_merchant(mut self, merchant: impl Into<String>) -> Self {
        self.merchant = Some(merchant.into());
        self
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }
}

impl LedgerEntry for Transaction {
    fn month(&self) -> Option<u32> {
        let month = self.date.month();
        (1..=12).contains(&month).then_some(month)
    }

    fn category(&self) -> &str {
        &self.category
    }

    fn amount(&self) -> f64 {
        self.amount
    }

    fn merchant(&self) -> Option<&str> {
        self.merchant.as_deref()
    }
}
