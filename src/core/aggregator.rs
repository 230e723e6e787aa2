//! Pure grouping and totalling helpers over [`LedgerEntry`] slices.
//!
//! Both [`Ledger`](crate::ledger::Ledger) and
//! [`ReportAnalyzer`](crate::core::report_analyzer::ReportAnalyzer) build their
//! summaries from these functions. Entries whose month cannot be derived are
//! skipped from month-keyed results rather than failing the whole computation.

use tracing::warn;

use crate::ledger::{
    AnnualSummary, CategoryGroup, LedgerEntry, MonthlyTotals, OrderedGroups, MONTHS_PER_YEAR,
};

/// Returns the 0-based bucket index for an entry, or `None` when undated.
fn month_index<E: LedgerEntry>(entry: &E) -> Option<usize> {
    let month = entry.month()?;
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    (index < MONTHS_PER_YEAR).then_some(index)
}

/// Splits entries into twelve calendar buckets, January first.
pub fn group_by_month<E: LedgerEntry>(entries: &[E]) -> Vec<Vec<&E>> {
    let mut buckets: Vec<Vec<&E>> = vec![Vec::new(); MONTHS_PER_YEAR];
    for entry in entries {
        match month_index(entry) {
            Some(index) => buckets[index].push(entry),
            None => warn!(
                category = entry.category(),
                amount = entry.amount(),
                "skipping entry without a valid month"
            ),
        }
    }
    buckets
}

/// Groups entries by exact category name in first-appearance order.
pub fn group_by_category<E: LedgerEntry>(entries: &[E]) -> OrderedGroups<CategoryGroup<&E>> {
    let mut groups: OrderedGroups<CategoryGroup<&E>> = OrderedGroups::new();
    for entry in entries {
        groups
            .entry_or_insert_with(entry.category(), CategoryGroup::default)
            .push(entry, entry.amount());
    }
    groups
}

/// Sums signed amounts of entries accepted by `keep`, per calendar month.
pub fn monthly_totals_where<E, F>(entries: &[E], mut keep: F) -> MonthlyTotals
where
    E: LedgerEntry,
    F: FnMut(&E) -> bool,
{
    let mut totals = MonthlyTotals::default();
    for entry in entries.iter().filter(|entry| keep(entry)) {
        if let Some(index) = month_index(entry) {
            totals.0[index] += entry.amount();
        }
    }
    totals
}

pub fn monthly_totals<E: LedgerEntry>(entries: &[E]) -> MonthlyTotals {
    monthly_totals_where(entries, |_| true)
}

/// Per-month sums of negative amounts (each total is `<= 0`).
pub fn expense_totals_by_month<E: LedgerEntry>(entries: &[E]) -> MonthlyTotals {
    monthly_totals_where(entries, |entry| entry.is_expense())
}

/// Per-month sums of positive amounts (each total is `>= 0`).
pub fn income_totals_by_month<E: LedgerEntry>(entries: &[E]) -> MonthlyTotals {
    monthly_totals_where(entries, |entry| entry.is_income())
}

/// Signed totals per category in first-appearance order.
pub fn category_totals<E: LedgerEntry>(entries: &[E]) -> OrderedGroups<f64> {
    category_totals_where(entries, |_| true)
}

/// Negative-amount totals per category, in first-appearance order of expenses.
pub fn expense_totals_by_category<E: LedgerEntry>(entries: &[E]) -> OrderedGroups<f64> {
    category_totals_where(entries, |entry| entry.is_expense())
}

fn category_totals_where<E, F>(entries: &[E], mut keep: F) -> OrderedGroups<f64>
where
    E: LedgerEntry,
    F: FnMut(&E) -> bool,
{
    let mut totals = OrderedGroups::new();
    for entry in entries.iter().filter(|entry| keep(entry)) {
        *totals.entry_or_insert_with(entry.category(), || 0.0) += entry.amount();
    }
    totals
}

/// Partitions on sign: strictly positive amounts are income, everything else
/// (zero included) lands on the expense side.
pub fn annual_summary<E: LedgerEntry>(entries: &[E]) -> AnnualSummary {
    let (income, expenses) = entries.iter().fold((0.0, 0.0), |(income, expenses), entry| {
        let amount = entry.amount();
        if amount > 0.0 {
            (income + amount, expenses)
        } else {
            (income, expenses + amount)
        }
    });
    AnnualSummary::new(income, expenses)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Raw {
        month: u32,
        category: &'static str,
        amount: f64,
    }

    impl LedgerEntry for Raw {
        fn month(&self) -> Option<u32> {
            (1..=12).contains(&self.month).then_some(self.month)
        }

        fn category(&self) -> &str {
            self.category
        }

        fn amount(&self) -> f64 {
            self.amount
        }
    }

    fn raw(month: u32, category: &'static str, amount: f64) -> Raw {
        Raw {
            month,
            category,
            amount,
        }
    }

    #[test]
    fn undated_entries_are_dropped_from_month_buckets() {
        let entries = vec![raw(1, "Food", -5.0), raw(13, "Food", -7.0), raw(0, "Pay", 9.0)];
        let buckets = group_by_month(&entries);
        assert_eq!(buckets.len(), 12);
        assert_eq!(buckets[0].len(), 1);
        assert_eq!(buckets.iter().map(Vec::len).sum::<usize>(), 1);
        assert_eq!(monthly_totals(&entries).sum(), -5.0);
    }

    #[test]
    fn undated_entries_still_count_toward_categories() {
        let entries = vec![raw(1, "Food", -5.0), raw(13, "Food", -7.0)];
        let groups = group_by_category(&entries);
        assert_eq!(groups.get("Food").map(|group| group.len()), Some(2));
        assert_eq!(groups.get("Food").map(|group| group.total), Some(-12.0));
    }

    #[test]
    fn expense_and_income_buckets_split_on_sign() {
        let entries = vec![
            raw(3, "Pay", 1000.0),
            raw(3, "Food", -40.0),
            raw(3, "Misc", 0.0),
            raw(4, "Food", -10.0),
        ];
        let expenses = expense_totals_by_month(&entries);
        let income = income_totals_by_month(&entries);
        assert_eq!(expenses.month(3), Some(-40.0));
        assert_eq!(expenses.month(4), Some(-10.0));
        assert_eq!(income.month(3), Some(1000.0));
        assert_eq!(income.month(4), Some(0.0));

        let by_category = expense_totals_by_category(&entries);
        assert_eq!(by_category.keys(), ["Food"]);
        assert_eq!(by_category.get("Food"), Some(&-50.0));
    }

    #[test]
    fn zero_amounts_count_on_the_expense_side() {
        let entries = vec![raw(1, "Pay", 50.0), raw(1, "Misc", 0.0)];
        let summary = annual_summary(&entries);
        assert_eq!(summary.total_income, 50.0);
        assert_eq!(summary.total_expenses, 0.0);
        assert_eq!(summary.net_balance, 50.0);
    }
}
