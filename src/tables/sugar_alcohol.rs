//! Sugar-alcohol factor table
//!
//! Calories per gram and net-carb offset for each sugar alcohol, matched by
//! substring against the product name.

use serde::Deserialize;
use serde_json::Value;

/// One sugar alcohol
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SugarAlcoholEntry {
    #[serde(alias = "matchKey")]
    pub key: String,
    #[serde(alias = "kcalPerGram")]
    pub kcal_per_g: f64,
    /// Fraction of the sugar-alcohol grams subtracted from carbs, in [0, 1]
    #[serde(alias = "netCarbFactor")]
    pub net_carb_factor: f64,
}

impl SugarAlcoholEntry {
    fn is_valid(&self) -> bool {
        !self.key.is_empty()
            && self.kcal_per_g.is_finite()
            && self.kcal_per_g >= 0.0
            && (0.0..=1.0).contains(&self.net_carb_factor)
    }
}

/// Factor pair applied to the sugar-alcohol grams of a product
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SugarAlcoholFactors {
    pub kcal_per_g: f64,
    pub net_carb_factor: f64,
}

impl SugarAlcoholFactors {
    /// No calories and no carb offset; used when nothing matches
    pub const NEUTRAL: Self = Self {
        kcal_per_g: 0.0,
        net_carb_factor: 0.0,
    };
}

/// Ordered sugar-alcohol table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SugarAlcoholTable {
    entries: Vec<SugarAlcoholEntry>,
}

impl SugarAlcoholTable {
    /// Parse the JSON source: an array of records, or an object of keyed records.
    ///
    /// Records that fail to deserialize or carry out-of-range factors are
    /// skipped. A document that is not JSON yields an empty table.
    pub fn parse(json: &str) -> Self {
        let document: Value = match serde_json::from_str(json) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!("Sugar-alcohol table is not valid JSON: {}", e);
                return Self::default();
            }
        };

        let records: Vec<Value> = match document {
            Value::Array(items) => items,
            Value::Object(map) => map.into_iter().map(|(_, v)| v).collect(),
            _ => Vec::new(),
        };

        let entries = records
            .into_iter()
            .filter_map(|record| match serde_json::from_value::<SugarAlcoholEntry>(record) {
                Ok(mut entry) => {
                    entry.key = entry.key.trim().to_lowercase();
                    entry.is_valid().then_some(entry)
                }
                Err(e) => {
                    tracing::debug!("Skipping sugar-alcohol record: {}", e);
                    None
                }
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Factors for the first entry whose key occurs in the product name
    pub fn lookup(&self, product_name: &str) -> SugarAlcoholFactors {
        let name = product_name.to_lowercase();

        self.entries
            .iter()
            .find(|entry| name.contains(&entry.key))
            .map(|entry| SugarAlcoholFactors {
                kcal_per_g: entry.kcal_per_g,
                net_carb_factor: entry.net_carb_factor,
            })
            .unwrap_or(SugarAlcoholFactors::NEUTRAL)
    }
}
