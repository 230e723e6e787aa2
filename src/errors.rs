use std::result::Result as StdResult;

use thiserror::Error;

/// Error type shared by the ledger, resolver, analyzer, and simulator.
#[derive(Debug, Error)]
pub enum InsightError {
    #[error("Invalid index {index}: ledger holds {len} transaction(s)")]
    InvalidIndex { index: usize, len: usize },
    #[error("Scenario not found: {0}")]
    UnknownScenario(String),
    #[error("Scenario already exists: {0}")]
    DuplicateScenario(String),
    #[error("Category `{category}` not found in scenario `{scenario}`{}", suggestion_suffix(.suggestion))]
    UnknownCategory {
        scenario: String,
        category: String,
        suggestion: Option<String>,
    },
    #[error("Scenario base data has not been loaded")]
    BaseDataUnavailable,
    #[error("Reduction plan does not match adjustable categories (expected {expected}, got {actual})")]
    PlanMismatch { expected: usize, actual: usize },
    #[error("Reduction plan category at position {position} is `{actual}`, expected `{expected}`")]
    PlanCategoryMismatch {
        position: usize,
        expected: String,
        actual: String,
    },
    #[error("No adjustment to undo")]
    NothingToUndo,
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = StdResult<T, InsightError>;

fn suggestion_suffix(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(name) => format!(" (did you mean `{}`?)", name),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_category_mentions_suggestion() {
        let err = InsightError::UnknownCategory {
            scenario: "Lean".into(),
            category: "Fod".into(),
            suggestion: Some("Food".into()),
        };
        let message = err.to_string();
        assert!(message.contains("`Fod`"), "unexpected message: {message}");
        assert!(message.contains("did you mean `Food`"), "unexpected message: {message}");
    }

    #[test]
    fn invalid_index_reports_bounds() {
        let err = InsightError::InvalidIndex { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Invalid index 4: ledger holds 2 transaction(s)");
    }
}
