use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    core::aggregator,
    errors::{InsightError, Result},
};

use super::{
    ordered::OrderedGroups,
    summary::{AnnualSummary, CategoryGroup, MonthlyTotals},
    transaction::Transaction,
};

const CURRENT_SCHEMA_VERSION: u8 = 1;

/// Ordered transactions for one user-year.
///
/// Indices are positional: removing an entry shifts every later entry down
/// by one, so callers must not hold on to indices across mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ledger {
    pub id: Uuid,
    pub year: i32,
    #[serde(default)]
    transactions: Vec<Transaction>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default = "Ledger::schema_version_default")]
    pub schema_version: u8,
}

impl Ledger {
    pub fn new(year: i32) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            year,
            transactions: Vec::new(),
            created_at: now,
            updated_at: now,
            schema_version: CURRENT_SCHEMA_VERSION,
        }
    }

    /// Builds a ledger from records already loaded by a storage layer.
    pub fn from_transactions(year: i32, transactions: Vec<Transaction>) -> Self {
        let mut ledger = Self::new(year);
        ledger.transactions = transactions;
        debug!(year, count = ledger.transactions.len(), "ledger loaded");
        ledger
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// Appends a transaction and returns its index. No validation happens here.
    pub fn add_transaction(
        &mut self,
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
    ) -> usize {
        self.push(Transaction::new(date, category, amount))
    }

    pub fn push(&mut self, transaction: Transaction) -> usize {
        debug!(
            category = %transaction.category,
            amount = transaction.amount,
            "transaction added"
        );
        self.transactions.push(transaction);
        self.touch();
        self.transactions.len() - 1
    }

    /// Removes the transaction at `index`; out-of-range indices leave the ledger untouched.
    pub fn remove_transaction(&mut self, index: usize) -> Result<Transaction> {
        self.check_index(index)?;
        let removed = self.transactions.remove(index);
        self.touch();
        debug!(index, category = %removed.category, "transaction removed");
        Ok(removed)
    }

    /// Replaces date, category, and amount of the transaction at `index`.
    pub fn update_transaction(
        &mut self,
        index: usize,
        date: NaiveDate,
        category: impl Into<String>,
        amount: f64,
    ) -> Result<()> {
        self.check_index(index)?;
        let txn = &mut self.transactions[index];
        txn.date = date;
        txn.category = category.into();
        txn.amount = amount;
        self.touch();
        debug!(index, "transaction updated");
        Ok(())
    }

    pub fn transaction(&self, index: usize) -> Option<&Transaction> {
        self.transactions.get(index)
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    /// Twelve buckets, January first.
    pub fn get_transactions_by_month(&self) -> Vec<Vec<Transaction>> {
        aggregator::group_by_month(&self.transactions)
            .into_iter()
            .map(|bucket| bucket.into_iter().cloned().collect())
            .collect()
    }

    pub fn get_transactions_by_category(&self) -> OrderedGroups<CategoryGroup<Transaction>> {
        aggregator::group_by_category(&self.transactions).map_values(|group| CategoryGroup {
            transactions: group.transactions.iter().map(|txn| (*txn).clone()).collect(),
            total: group.total,
        })
    }

    pub fn calculate_monthly_totals(&self) -> MonthlyTotals {
        aggregator::monthly_totals(&self.transactions)
    }

    pub fn calculate_annual_summary(&self) -> AnnualSummary {
        aggregator::annual_summary(&self.transactions)
    }

    pub fn category_totals(&self) -> OrderedGroups<f64> {
        aggregator::category_totals(&self.transactions)
    }

    /// Independent copy of every transaction, suitable for write-back.
    pub fn get_all_transactions(&self) -> Vec<Transaction> {
        self.transactions.clone()
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    pub fn schema_version_default() -> u8 {
        CURRENT_SCHEMA_VERSION
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.transactions.len() {
            Ok(())
        } else {
            warn!(index, len = self.transactions.len(), "invalid transaction index");
            Err(InsightError::InvalidIndex {
                index,
                len: self.transactions.len(),
            })
        }
    }
}
