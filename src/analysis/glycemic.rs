//! Glycemic index resolution
//!
//! Precedence: explicit GI on the label, then the food-name table, then the
//! ingredient category estimate.

use serde::Serialize;

use super::category::{categorize, FoodCategory};
use crate::models::GiConfidence;
use crate::tables::{GiTable, ReferenceTables};

/// A resolved GI and where it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GiResolution {
    pub gi: f64,
    pub confidence: GiConfidence,
    /// GI table food that matched, for table resolutions
    pub matched_food: Option<String>,
}

/// Resolve GI given an already computed ingredient category
pub fn resolve_gi_with_category(
    explicit_gi: Option<f64>,
    product_name: Option<&str>,
    category: &FoodCategory,
    gi_table: &GiTable,
) -> GiResolution {
    if let Some(gi) = explicit_gi {
        return GiResolution {
            gi,
            confidence: GiConfidence::Direct,
            matched_food: None,
        };
    }

    if let Some(hit) = product_name.and_then(|name| gi_table.lookup(name)) {
        return GiResolution {
            gi: hit.gi,
            confidence: GiConfidence::Table,
            matched_food: Some(hit.food.to_string()),
        };
    }

    GiResolution {
        gi: category.gi_estimate,
        confidence: GiConfidence::Heuristic(category.confidence),
        matched_food: None,
    }
}

/// Resolve a product's GI from the label, product name and ingredient text
pub fn resolve_gi(
    explicit_gi: Option<f64>,
    product_name: Option<&str>,
    ingredients: Option<&str>,
    tables: &ReferenceTables,
) -> GiResolution {
    let category = categorize(ingredients, &tables.categories);
    resolve_gi_with_category(explicit_gi, product_name, &category, &tables.gi_foods)
}
