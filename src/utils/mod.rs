use std::sync::Once;

use strsim::levenshtein;

/// Tolerance used when comparing derived monetary values.
pub const AMOUNT_EPSILON: f64 = 1e-9;

const SUGGESTION_MAX_DISTANCE: usize = 3;

static TRACING_INIT: Once = Once::new();

/// Initializes the global tracing subscriber with sensible defaults.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{filter::LevelFilter, fmt, EnvFilter};

        let filter = EnvFilter::from_default_env().add_directive(
            "budget_insight=info"
                .parse()
                .unwrap_or_else(|_| LevelFilter::INFO.into()),
        );

        // Another subscriber may already be installed by the host binary.
        let _ = fmt().with_env_filter(filter).try_init();
    });
}

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() <= AMOUNT_EPSILON * left.abs().max(right.abs()).max(1.0)
}

/// Returns the candidate closest to `needle`, if it is a plausible typo.
pub fn closest_match<'a, I>(needle: &str, candidates: I) -> Option<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let needle = needle.to_ascii_lowercase();
    candidates
        .into_iter()
        .map(|candidate| (levenshtein(&needle, &candidate.to_ascii_lowercase()), candidate))
        .filter(|(distance, _)| *distance <= SUGGESTION_MAX_DISTANCE)
        .min_by_key(|(distance, _)| *distance)
        .map(|(_, candidate)| candidate.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn approx_eq_tolerates_float_noise() {
        assert!(approx_eq(0.1 + 0.2, 0.3));
        assert!(!approx_eq(97.5, 97.6));
    }

    #[test]
    fn closest_match_prefers_smallest_distance() {
        let names = ["Food", "Fuel", "Entertainment"];
        assert_eq!(closest_match("fod", names), Some("Food".to_string()));
        assert_eq!(closest_match("Groceries", names), None);
    }
}
