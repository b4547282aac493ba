//! Keto analysis output
//!
//! Records produced fresh by each analysis call.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};

/// Nutritional profile normalized to 100 g of product
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Per100gProfile {
    pub fat100: f64,
    pub sat_fat100: f64,
    pub trans_fat100: f64,
    pub protein100: f64,
    pub carbs100: f64,
    pub fiber100: f64,
    pub sugar100: f64,
    /// Sugar alcohol grams
    pub sa100: f64,
    pub added_sugar100: f64,
    pub net_carb100: f64,
    /// Calories reconstructed from macros
    pub kcal100: f64,
    pub gi: f64,
    /// Glycemic load of 100 g
    pub gl100: f64,
    /// Fat-dominance ratio
    #[serde(rename = "R")]
    pub r: f64,
    /// Share of calories from net carbs, in percent
    pub pct_carb: f64,
    /// Saturated fat as a fraction of total fat
    pub sat_ratio: f64,
    /// Sodium in mg per 100 g
    pub sodium_density: f64,
    /// Gram shares of fat, protein and net carbs; None without any of them
    pub macro_shares: Option<MacroShares>,
}

/// Fat, protein and net carbs as percentages of their combined grams
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MacroShares {
    pub fat_pct: f64,
    pub protein_pct: f64,
    pub net_carb_pct: f64,
}

/// Keto pass/fail gates
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Verdict {
    pub keto_ok: bool,
    pub passes_net: bool,
    pub passes_r: bool,
}

/// Where the glycemic index came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GiConfidence {
    /// Supplied on the label data
    Direct,
    /// Matched in the food-name GI table
    Table,
    /// Estimated from the ingredient category, with the category confidence
    Heuristic(f64),
}

impl fmt::Display for GiConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GiConfidence::Direct => write!(f, "direct"),
            GiConfidence::Table => write!(f, "table"),
            GiConfidence::Heuristic(confidence) => write!(f, "heuristic-{}", confidence),
        }
    }
}

impl Serialize for GiConfidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full result of analysing one label
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KetoMathResult {
    pub per100g: Per100gProfile,
    pub verdict: Verdict,
    pub calorie_mismatch: bool,
    /// Label calories rescaled to 100 g, when the label stated calories
    pub original_kcal100: Option<f64>,
    pub gi_confidence: GiConfidence,
    /// 0-100 suitability score
    pub keto_score: f64,
    /// Nutrient name -> milligrams
    pub micros_per100g: BTreeMap<String, f64>,
    pub warnings: Vec<String>,
    pub food_category: String,
    pub claims: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gi_confidence_tags() {
        assert_eq!(GiConfidence::Direct.to_string(), "direct");
        assert_eq!(GiConfidence::Table.to_string(), "table");
        assert_eq!(GiConfidence::Heuristic(0.4).to_string(), "heuristic-0.4");
        assert_eq!(GiConfidence::Heuristic(0.7).to_string(), "heuristic-0.7");
    }

    #[test]
    fn test_gi_confidence_serializes_as_tag() {
        let json = serde_json::to_string(&GiConfidence::Heuristic(0.6)).unwrap();
        assert_eq!(json, "\"heuristic-0.6\"");
    }

    #[test]
    fn test_profile_field_names() {
        let value = serde_json::to_value(Per100gProfile::default()).unwrap();
        assert!(value.get("R").is_some());
        assert!(value.get("netCarb100").is_some());
        assert!(value.get("addedSugar100").is_some());
        assert!(value.get("sodiumDensity").is_some());
    }
}
