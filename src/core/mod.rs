//! Analytical engine: aggregation, deficit resolution, and reporting.

pub mod aggregator;
pub mod deficit;
pub mod report_analyzer;

pub use deficit::{
    AppliedAdjustment, DeficitResolver, FlatRatePolicy, ReductionPlan, WhatIfOutcome,
    YearDataSource, YearSnapshot,
};
pub use report_analyzer::{
    CategorySpend, EntryKind, Finding, MonthBalance, MonthSpend, ReportAnalyzer, ReportRecord,
};
