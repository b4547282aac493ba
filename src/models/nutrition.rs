//! Nutrition label data
//!
//! The record produced by the external label extraction step, plus the
//! correction record used when a user edits a scanned label.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

use crate::nutrition::parse_serving_weight;

/// Structured nutrition-label data for one scanned product.
///
/// Quantities are per serving as printed on the label: macros in grams,
/// sodium in milligrams, micronutrients as %DV. Absent numeric fields count
/// as zero, except `calories` and `gi` whose absence changes the analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionData {
    pub product_name: Option<String>,
    /// Free text such as "30 g" or "2 tbsp (30 mL)"
    pub serving_size: Option<String>,
    /// Serving weight in grams, derived from `serving_size` when not supplied
    pub serving_weight_g: Option<f64>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub sat_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sugar_alcohol: Option<f64>,
    pub added_sugar: Option<f64>,
    pub sodium: Option<f64>,
    /// Glycemic index printed on the label or supplied by the extractor
    pub gi: Option<f64>,
    pub ingredients: Option<String>,
    /// Nutrient name -> %DV
    #[serde(default, deserialize_with = "null_as_default")]
    pub micros: BTreeMap<String, f64>,
    /// Front-of-pack claims ("keto friendly", "no added sugar", ...)
    #[serde(default, deserialize_with = "null_as_default")]
    pub claims: Vec<String>,
}

/// Extractors emit `null` for an empty collection
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl NutritionData {
    /// Resolve the serving weight in grams.
    ///
    /// An explicit `serving_weight_g` wins; otherwise `serving_size` is parsed.
    /// Returns None unless the result is finite and positive.
    pub fn resolved_serving_weight(&self) -> Option<f64> {
        let weight = self
            .serving_weight_g
            .or_else(|| self.serving_size.as_deref().and_then(parse_serving_weight))?;

        if weight.is_finite() && weight > 0.0 {
            Some(weight)
        } else {
            None
        }
    }

    /// Fill in `serving_weight_g` from `serving_size` when it is missing
    pub fn with_derived_serving_weight(mut self) -> Self {
        if self.serving_weight_g.is_none() {
            self.serving_weight_g = self.serving_size.as_deref().and_then(parse_serving_weight);
        }
        self
    }

    /// Demo label returned when no extraction backend is configured
    pub fn sample() -> Self {
        Self {
            product_name: Some("Sample Nutrition Label".to_string()),
            serving_size: Some("1 cup (240g)".to_string()),
            calories: Some(150.0),
            protein: Some(8.0),
            carbs: Some(20.0),
            fat: Some(5.0),
            fiber: Some(3.0),
            sugar: Some(12.0),
            sodium: Some(300.0),
            ..Self::default()
        }
        .with_derived_serving_weight()
    }

    /// Apply user corrections, returning the corrected record
    pub fn apply(&self, update: &NutritionDataUpdate) -> Self {
        let mut data = self.clone();

        macro_rules! apply_field {
            ($($field:ident),+ $(,)?) => {
                $(
                    if let Some(ref val) = update.$field {
                        data.$field = Some(val.clone());
                    }
                )+
            };
        }

        // A new serving size invalidates the weight derived from the old one
        if update.serving_size.is_some() && update.serving_weight_g.is_none() {
            data.serving_weight_g = None;
        }

        apply_field!(
            product_name,
            serving_size,
            serving_weight_g,
            calories,
            fat,
            sat_fat,
            trans_fat,
            protein,
            carbs,
            fiber,
            sugar,
            sugar_alcohol,
            added_sugar,
            sodium,
            gi,
            ingredients,
        );

        if let Some(ref micros) = update.micros {
            data.micros = micros.clone();
        }
        if let Some(ref claims) = update.claims {
            data.claims = claims.clone();
        }

        data
    }
}

/// Corrections to a scanned label; only present fields are applied
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutritionDataUpdate {
    pub product_name: Option<String>,
    pub serving_size: Option<String>,
    pub serving_weight_g: Option<f64>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub sat_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sugar_alcohol: Option<f64>,
    pub added_sugar: Option<f64>,
    pub sodium: Option<f64>,
    pub gi: Option<f64>,
    pub ingredients: Option<String>,
    pub micros: Option<BTreeMap<String, f64>>,
    pub claims: Option<Vec<String>>,
}
