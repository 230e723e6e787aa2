use serde::{Deserialize, Serialize};

use crate::errors::{InsightError, Result};

/// Proposed cut per adjustable category, index-aligned with the category list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionPlan {
    categories: Vec<String>,
    amounts: Vec<f64>,
}

impl ReductionPlan {
    pub fn new(categories: Vec<String>, amounts: Vec<f64>) -> Result<Self> {
        if categories.len() != amounts.len() {
            return Err(InsightError::PlanMismatch {
                expected: categories.len(),
                actual: amounts.len(),
            });
        }
        Ok(Self {
            categories,
            amounts,
        })
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.categories
            .iter()
            .map(String::as_str)
            .zip(self.amounts.iter().copied())
    }
}

/// Result of applying a plan to the resolver's live totals.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppliedAdjustment {
    /// Cuts actually taken after clamping to each category's live total.
    pub applied: ReductionPlan,
    pub total_reduced: f64,
    pub remaining_deficit: f64,
}

/// Single-slot record of the state before the most recent application.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct AdjustmentSnapshot {
    pub(crate) previous_totals: Vec<f64>,
    pub(crate) previous_total_expenses: f64,
    pub(crate) applied: ReductionPlan,
}

/// Outcome of cutting a single category to cover the deficit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WhatIfOutcome {
    pub amount_reduced: f64,
    pub remaining_deficit: f64,
}
