//! Runtime configuration
//!
//! Settings come from environment variables only:
//! - `KETOSCAN_TABLES_DIR`: directory with the four reference table files
//! - `KETOSCAN_CALORIE_TOLERANCE`: relative calorie-mismatch tolerance

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_TABLES_DIR: &str = "KETOSCAN_TABLES_DIR";
pub const ENV_CALORIE_TOLERANCE: &str = "KETOSCAN_CALORIE_TOLERANCE";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value '{value}' for {name}: {reason}")]
    InvalidValue {
        name: &'static str,
        value: String,
        reason: &'static str,
    },
}

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Numeric gates used by the analysis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    /// Net carbs per 100 g must be below this
    pub net_carb_limit: f64,
    /// Fat-dominance ratio must be at least this
    pub min_fat_ratio: f64,
    /// Relative difference between label and reconstructed calories
    pub calorie_tolerance: f64,
    /// Percent of calories from net carbs
    pub pct_carb_limit: f64,
    /// Glycemic load per 100 g
    pub glycemic_load_limit: f64,
    /// Saturated share of total fat
    pub sat_ratio_limit: f64,
    /// Sodium mg per 100 g
    pub sodium_limit_mg: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            net_carb_limit: 5.0,
            min_fat_ratio: 1.0,
            calorie_tolerance: 0.2,
            pct_carb_limit: 10.0,
            glycemic_load_limit: 5.0,
            sat_ratio_limit: 0.66,
            sodium_limit_mg: 600.0,
        }
    }
}

/// Process settings
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Settings {
    /// None means the embedded tables
    pub tables_dir: Option<PathBuf>,
    pub thresholds: Thresholds,
}

impl Settings {
    /// Read settings from the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through a variable lookup function
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let tables_dir = lookup(ENV_TABLES_DIR)
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from);

        let mut thresholds = Thresholds::default();
        if let Some(raw) = lookup(ENV_CALORIE_TOLERANCE) {
            thresholds.calorie_tolerance = parse_tolerance(&raw)?;
        }

        Ok(Self {
            tables_dir,
            thresholds,
        })
    }
}

fn parse_tolerance(raw: &str) -> ConfigResult<f64> {
    let invalid = |reason| ConfigError::InvalidValue {
        name: ENV_CALORIE_TOLERANCE,
        value: raw.to_string(),
        reason,
    };

    let value: f64 = raw.trim().parse().map_err(|_| invalid("not a number"))?;
    if !value.is_finite() || value <= 0.0 {
        return Err(invalid("must be a positive number"));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> ConfigResult<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn test_defaults() {
        let s = settings(&[]).unwrap();
        assert_eq!(s, Settings::default());
        assert_eq!(s.thresholds.calorie_tolerance, 0.2);
    }

    #[test]
    fn test_overrides() {
        let s = settings(&[
            (ENV_TABLES_DIR, "/opt/ketoscan/tables"),
            (ENV_CALORIE_TOLERANCE, "0.1"),
        ])
        .unwrap();
        assert_eq!(s.tables_dir, Some(PathBuf::from("/opt/ketoscan/tables")));
        assert_eq!(s.thresholds.calorie_tolerance, 0.1);
    }

    #[test]
    fn test_blank_tables_dir_ignored() {
        let s = settings(&[(ENV_TABLES_DIR, "  ")]).unwrap();
        assert_eq!(s.tables_dir, None);
    }

    #[test]
    fn test_invalid_tolerance() {
        assert!(settings(&[(ENV_CALORIE_TOLERANCE, "loose")]).is_err());
        assert!(settings(&[(ENV_CALORIE_TOLERANCE, "0")]).is_err());
        assert!(settings(&[(ENV_CALORIE_TOLERANCE, "-0.2")]).is_err());
        assert!(settings(&[(ENV_CALORIE_TOLERANCE, "inf")]).is_err());
    }
}
