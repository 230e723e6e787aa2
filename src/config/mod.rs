//! Category classification settings and their JSON persistence.

use std::{
    env,
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{InsightError, Result};

const CONFIG_DIR: &str = "budget_insight";
const HOME_ENV: &str = "BUDGET_INSIGHT_HOME";
const CONFIG_FILE: &str = "config.json";
const TMP_SUFFIX: &str = "tmp";

/// Decides which categories count as expenses and which are protected from cuts.
pub trait ExpenseClassifier {
    fn is_expense_category(&self, category: &str) -> bool;
    fn is_fixed_category(&self, category: &str) -> bool;

    /// Expense categories that deficit reductions may target.
    fn is_adjustable_category(&self, category: &str) -> bool {
        self.is_expense_category(category) && !self.is_fixed_category(category)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightConfig {
    #[serde(default = "InsightConfig::default_fixed_categories")]
    pub fixed_categories: Vec<String>,
    #[serde(default = "InsightConfig::default_income_categories")]
    pub income_categories: Vec<String>,
    #[serde(default = "InsightConfig::default_flat_reduction_rate")]
    pub flat_reduction_rate: f64,
    #[serde(default = "InsightConfig::default_flat_rate_exempt")]
    pub flat_rate_exempt: Vec<String>,
}

impl Default for InsightConfig {
    fn default() -> Self {
        Self {
            fixed_categories: Self::default_fixed_categories(),
            income_categories: Self::default_income_categories(),
            flat_reduction_rate: Self::default_flat_reduction_rate(),
            flat_rate_exempt: Self::default_flat_rate_exempt(),
        }
    }
}

impl InsightConfig {
    pub fn default_fixed_categories() -> Vec<String> {
        ["Rent", "Home", "Utilities", "Work"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn default_income_categories() -> Vec<String> {
        ["Pay", "Salary", "Income", "Bonus", "Interest"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    pub fn default_flat_reduction_rate() -> f64 {
        0.10
    }

    pub fn default_flat_rate_exempt() -> Vec<String> {
        vec!["Rent".into()]
    }

    pub fn is_flat_rate_exempt(&self, category: &str) -> bool {
        contains_ignore_case(&self.flat_rate_exempt, category)
    }

    /// Rejects settings the resolver cannot work with.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.flat_reduction_rate) {
            return Err(InsightError::Config(format!(
                "flat_reduction_rate must be within 0..=1, got {}",
                self.flat_reduction_rate
            )));
        }
        if let Some(blank) = self
            .fixed_categories
            .iter()
            .chain(&self.income_categories)
            .find(|name| name.trim().is_empty())
        {
            return Err(InsightError::Config(format!(
                "category names must not be blank: {:?}",
                blank
            )));
        }
        Ok(())
    }
}

impl ExpenseClassifier for InsightConfig {
    fn is_expense_category(&self, category: &str) -> bool {
        !contains_ignore_case(&self.income_categories, category)
    }

    fn is_fixed_category(&self, category: &str) -> bool {
        contains_ignore_case(&self.fixed_categories, category)
    }
}

fn contains_ignore_case(names: &[String], candidate: &str) -> bool {
    let candidate = candidate.trim();
    names
        .iter()
        .any(|name| name.trim().eq_ignore_ascii_case(candidate))
}

/// Loads and stores [`InsightConfig`] as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    /// Uses `BUDGET_INSIGHT_HOME` when set, otherwise the platform configuration directory.
    pub fn new() -> Result<Self> {
        if let Some(custom) = env::var_os(HOME_ENV) {
            return Self::with_base_dir(PathBuf::from(custom));
        }
        let base = dirs::config_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR);
        Self::with_base_dir(base)
    }

    pub fn with_base_dir(base: PathBuf) -> Result<Self> {
        let config_root = base.join("config");
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: config_root.join(CONFIG_FILE),
        })
    }

    pub fn load(&self) -> Result<InsightConfig> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no config file, using defaults");
            return Ok(InsightConfig::default());
        }
        let data = fs::read_to_string(&self.path)?;
        let config: InsightConfig = serde_json::from_str(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, config: &InsightConfig) -> Result<()> {
        config.validate()?;
        let json = serde_json::to_string_pretty(config)?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), "config saved");
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
