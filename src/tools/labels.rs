//! Label Analysis Tools
//!
//! Tool-level operations over the analysis pipeline and its components.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::analysis::{
    categorize, convert_micros, resolve_gi, AnalysisError, FoodCategory, GiResolution,
    KetoAnalyzer,
};
use crate::models::{KetoMathResult, NutritionData, NutritionDataUpdate};
use crate::nutrition::{parse_serving, ParsedServing};
use crate::tables::ReferenceTables;

/// Response for analyze_nutrition_label
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalyzeLabelResponse {
    Analyzed {
        result: KetoMathResult,
    },
    /// Serving weight missing; the caller should ask for a clearer label
    Unavailable {
        reason: &'static str,
        message: String,
        serving_size: Option<String>,
    },
}

impl AnalyzeLabelResponse {
    pub fn is_analyzed(&self) -> bool {
        matches!(self, AnalyzeLabelResponse::Analyzed { .. })
    }
}

/// Response for reanalyze_with_corrections
#[derive(Debug, Serialize)]
pub struct ReanalyzeResponse {
    pub corrected: NutritionData,
    pub analysis: AnalyzeLabelResponse,
}

/// Response for parse_serving_size
#[derive(Debug, Serialize)]
pub struct ParseServingResponse {
    pub serving_size: String,
    pub parsed: Option<ParsedServing>,
}

/// Response for convert_micronutrients
#[derive(Debug, Serialize)]
pub struct ConvertMicrosResponse {
    pub micros_mg: BTreeMap<String, f64>,
    /// Inputs left out: no daily value, or zero after conversion
    pub dropped: Vec<String>,
}

/// Analyse one label
pub fn analyze_label(analyzer: &KetoAnalyzer<'_>, data: &NutritionData) -> AnalyzeLabelResponse {
    match analyzer.analyze(data) {
        Ok(result) => AnalyzeLabelResponse::Analyzed { result },
        Err(e) => {
            tracing::info!("Label analysis unavailable: {}", e);
            let message = format!(
                "{}. Provide the serving weight in grams or mL, e.g. \"30 g\".",
                e
            );
            let AnalysisError::MissingServingWeight { serving_size } = e;
            AnalyzeLabelResponse::Unavailable {
                reason: "missing_serving_weight",
                message,
                serving_size,
            }
        }
    }
}

/// Apply corrections to a label and analyse the result
pub fn reanalyze_with_corrections(
    analyzer: &KetoAnalyzer<'_>,
    data: &NutritionData,
    corrections: &NutritionDataUpdate,
) -> ReanalyzeResponse {
    let corrected = data.apply(corrections).with_derived_serving_weight();
    let analysis = analyze_label(analyzer, &corrected);
    ReanalyzeResponse { corrected, analysis }
}

/// Parse a serving size string
pub fn parse_serving_size(serving_size: &str) -> ParseServingResponse {
    ParseServingResponse {
        serving_size: serving_size.to_string(),
        parsed: parse_serving(serving_size),
    }
}

/// Categorize an ingredient list
pub fn categorize_ingredients(tables: &ReferenceTables, ingredients: Option<&str>) -> FoodCategory {
    categorize(ingredients, &tables.categories)
}

/// Resolve a product's glycemic index
pub fn resolve_glycemic_index(
    tables: &ReferenceTables,
    gi: Option<f64>,
    product_name: Option<&str>,
    ingredients: Option<&str>,
) -> GiResolution {
    resolve_gi(gi, product_name, ingredients, tables)
}

/// Convert %DV micronutrients to milligrams
pub fn convert_micronutrients(
    tables: &ReferenceTables,
    micros: &BTreeMap<String, f64>,
) -> ConvertMicrosResponse {
    let micros_mg = convert_micros(micros, &tables.daily_values);
    let dropped = micros
        .keys()
        .filter(|name| !micros_mg.contains_key(*name))
        .cloned()
        .collect();

    ConvertMicrosResponse { micros_mg, dropped }
}
