//! Deficit detection and expense-reduction proposals.
//!
//! The overall deficit is the shortfall of income against all expenses. What
//! the resolver reports as *the* deficit is that shortfall capped at the total
//! spend of adjustable categories, since nothing beyond that can be cut.

mod plan;
mod source;

pub use plan::{AppliedAdjustment, ReductionPlan, WhatIfOutcome};
pub use source::{YearDataSource, YearSnapshot};

use tracing::{debug, info, warn};

use crate::{
    config::{ExpenseClassifier, InsightConfig},
    errors::{InsightError, Result},
    ledger::OrderedGroups,
};

use plan::AdjustmentSnapshot;

/// Flat-rate cut settings.
#[derive(Debug, Clone, PartialEq)]
pub struct FlatRatePolicy {
    pub rate: f64,
    /// Categories that always receive a zero flat cut.
    pub exempt: Vec<String>,
}

impl From<&InsightConfig> for FlatRatePolicy {
    fn from(config: &InsightConfig) -> Self {
        Self {
            rate: config.flat_reduction_rate,
            exempt: config.flat_rate_exempt.clone(),
        }
    }
}

impl FlatRatePolicy {
    /// The configured rate clamped to `0..=1`; a non-finite rate cuts nothing.
    pub fn effective_rate(&self) -> f64 {
        if self.rate.is_finite() {
            self.rate.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    fn is_exempt(&self, category: &str) -> bool {
        self.exempt
            .iter()
            .any(|name| name.eq_ignore_ascii_case(category))
    }
}

pub struct DeficitResolver {
    total_income: f64,
    total_expenses: f64,
    /// Live spend per adjustable category, stored as positive magnitudes.
    adjustable: OrderedGroups<f64>,
    policy: FlatRatePolicy,
    last_adjustment: Option<AdjustmentSnapshot>,
}

impl DeficitResolver {
    pub fn new<S>(source: &S, config: &InsightConfig) -> Self
    where
        S: YearDataSource + ?Sized,
    {
        Self::with_classifier(source, config, FlatRatePolicy::from(config))
    }

    pub fn with_classifier<S, C>(source: &S, classifier: &C, policy: FlatRatePolicy) -> Self
    where
        S: YearDataSource + ?Sized,
        C: ExpenseClassifier + ?Sized,
    {
        let mut adjustable: OrderedGroups<f64> = OrderedGroups::new();
        for (category, amount) in source.category_amounts() {
            if amount < 0.0 && classifier.is_adjustable_category(category) {
                *adjustable.entry_or_insert_with(category, || 0.0) += -amount;
            }
        }
        if policy.effective_rate() != policy.rate {
            warn!(
                rate = policy.rate,
                effective = policy.effective_rate(),
                "flat reduction rate outside 0..=1, clamping"
            );
        }
        let resolver = Self {
            total_income: source.total_income(),
            total_expenses: source.total_expenses(),
            adjustable,
            policy,
            last_adjustment: None,
        };
        debug!(
            overall_deficit = resolver.overall_deficit(),
            adjustable_categories = resolver.adjustable.len(),
            adjustable_spend = resolver.total_adjustable_spend(),
            "deficit resolver prepared"
        );
        resolver
    }

    /// Shortfall of income against all expenses, before any cap.
    pub fn overall_deficit(&self) -> f64 {
        (-(self.total_income + self.total_expenses)).max(0.0)
    }

    pub fn total_adjustable_spend(&self) -> f64 {
        self.adjustable.values().iter().sum()
    }

    pub fn get_categories(&self) -> &[String] {
        self.adjustable.keys()
    }

    pub fn adjustable_totals(&self) -> &OrderedGroups<f64> {
        &self.adjustable
    }

    /// Portion of the overall deficit that adjustable categories can cover.
    pub fn calculate_deficit(&self) -> f64 {
        let overall = self.overall_deficit();
        let adjustable = self.total_adjustable_spend();
        if overall <= 0.0 || adjustable <= 0.0 {
            return 0.0;
        }
        overall.min(adjustable)
    }

    /// Flat-rate cut for every adjustable category.
    ///
    /// The sum is not scaled to the deficit and may over- or under-shoot it.
    pub fn identify_adjustments(&self) -> Vec<f64> {
        if self.calculate_deficit() <= 0.0 {
            return vec![0.0; self.adjustable.len()];
        }
        self.adjustable
            .iter()
            .map(|(category, spend)| {
                if self.policy.is_exempt(category) {
                    0.0
                } else {
                    spend * self.policy.effective_rate()
                }
            })
            .collect()
    }

    /// Distributes the capped deficit by each category's share of adjustable spend.
    pub fn proportional_reductions(&self) -> Vec<f64> {
        let total = self.total_adjustable_spend();
        let overall = self.overall_deficit();
        if total <= 0.0 || overall <= 0.0 {
            return vec![0.0; self.adjustable.len()];
        }
        let target = overall.min(total);
        self.adjustable
            .values()
            .iter()
            .map(|spend| spend / total * target)
            .collect()
    }

    /// Pairs per-category amounts with the current adjustable category list.
    pub fn plan_from(&self, amounts: Vec<f64>) -> Result<ReductionPlan> {
        ReductionPlan::new(self.adjustable.keys().to_vec(), amounts)
    }

    /// Adjustable spend for `category`, matched ignoring case; zero if absent.
    pub fn get_total_for_category(&self, category: &str) -> f64 {
        self.adjustable.find_ignore_case(category.trim()).sum()
    }

    pub fn what_if_reduce_category(&self, category: &str) -> WhatIfOutcome {
        let deficit = self.calculate_deficit();
        let available = self.get_total_for_category(category);
        if available >= deficit {
            WhatIfOutcome {
                amount_reduced: deficit,
                remaining_deficit: 0.0,
            }
        } else {
            WhatIfOutcome {
                amount_reduced: available,
                remaining_deficit: deficit - available,
            }
        }
    }

    pub fn generate_what_if_summary(&self, category: &str) -> String {
        let deficit = self.calculate_deficit();
        if deficit <= 0.0 {
            return format!(
                "There is no deficit to cover, so no reduction in {} is needed.",
                category
            );
        }
        let available = self.get_total_for_category(category);
        if available <= 0.0 {
            return format!(
                "No adjustable spending was found for {}; the deficit of {:.2} remains.",
                category, deficit
            );
        }
        let outcome = self.what_if_reduce_category(category);
        if outcome.remaining_deficit <= 0.0 {
            format!(
                "Reducing {} by {:.2} (of {:.2} spent) covers the full deficit of {:.2}.",
                category, outcome.amount_reduced, available, deficit
            )
        } else {
            format!(
                "Cutting all {:.2} of {} spending leaves {:.2} of the {:.2} deficit uncovered.",
                outcome.amount_reduced, category, outcome.remaining_deficit, deficit
            )
        }
    }

    /// Subtracts `plan` from the live totals and remembers the prior state.
    ///
    /// Only the most recent application can be undone; applying again
    /// replaces the stored snapshot.
    pub fn apply_adjustments(&mut self, plan: &ReductionPlan) -> Result<AppliedAdjustment> {
        self.check_plan(plan)?;

        let previous_totals = self.adjustable.values().to_vec();
        let previous_total_expenses = self.total_expenses;
        let cuts: Vec<f64> = plan
            .amounts()
            .iter()
            .zip(&previous_totals)
            .map(|(requested, live)| {
                if requested.is_finite() {
                    requested.clamp(0.0, *live)
                } else {
                    0.0
                }
            })
            .collect();

        for (live, cut) in self.adjustable.values_mut().iter_mut().zip(&cuts) {
            *live -= cut;
        }
        let applied = self.plan_from(cuts)?;
        let total_reduced = applied.total();
        self.total_expenses += total_reduced;
        self.last_adjustment = Some(AdjustmentSnapshot {
            previous_totals,
            previous_total_expenses,
            applied: applied.clone(),
        });

        let remaining_deficit = self.calculate_deficit();
        info!(total_reduced, remaining_deficit, "reduction plan applied");
        Ok(AppliedAdjustment {
            applied,
            total_reduced,
            remaining_deficit,
        })
    }

    /// Restores the totals captured by the last [`apply_adjustments`](Self::apply_adjustments).
    pub fn undo_last_adjustment(&mut self) -> Result<ReductionPlan> {
        let snapshot = self
            .last_adjustment
            .take()
            .ok_or(InsightError::NothingToUndo)?;
        for (live, previous) in self
            .adjustable
            .values_mut()
            .iter_mut()
            .zip(&snapshot.previous_totals)
        {
            *live = *previous;
        }
        self.total_expenses = snapshot.previous_total_expenses;
        info!(total_restored = snapshot.applied.total(), "reduction plan undone");
        Ok(snapshot.applied)
    }

    pub fn can_undo(&self) -> bool {
        self.last_adjustment.is_some()
    }

    fn check_plan(&self, plan: &ReductionPlan) -> Result<()> {
        let live = self.adjustable.keys();
        if plan.len() != live.len() {
            warn!(
                expected = live.len(),
                actual = plan.len(),
                "reduction plan does not match adjustable categories"
            );
            return Err(InsightError::PlanMismatch {
                expected: live.len(),
                actual: plan.len(),
            });
        }
        let mismatch = live
            .iter()
            .zip(plan.categories())
            .position(|(expected, actual)| expected != actual);
        if let Some(position) = mismatch {
            let expected = live[position].clone();
            let actual = plan.categories()[position].clone();
            warn!(position, %expected, %actual, "reduction plan category mismatch");
            return Err(InsightError::PlanCategoryMismatch {
                position,
                expected,
                actual,
            });
        }
        Ok(())
    }
}
