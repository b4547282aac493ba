//! Per-100 g normalization and net carbs
//!
//! Every per-serving quantity is rescaled by `100 / serving weight`.

use crate::models::NutritionData;
use crate::tables::{SugarAlcoholFactors, SugarAlcoholTable};

/// Label quantities rescaled to 100 g
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Per100g {
    pub factor100: f64,
    pub fat100: f64,
    pub sat_fat100: f64,
    pub trans_fat100: f64,
    pub protein100: f64,
    pub carbs100: f64,
    pub fiber100: f64,
    pub sugar100: f64,
    pub sa100: f64,
    pub added_sugar100: f64,
    /// Milligrams
    pub sodium100: f64,
}

/// Rescale a label to 100 g. `serving_weight_g` must be positive.
pub fn normalize(data: &NutritionData, serving_weight_g: f64) -> Per100g {
    let factor100 = 100.0 / serving_weight_g;
    let scale = |value: Option<f64>| value.unwrap_or(0.0) * factor100;

    Per100g {
        factor100,
        fat100: scale(data.fat),
        sat_fat100: scale(data.sat_fat),
        trans_fat100: scale(data.trans_fat),
        protein100: scale(data.protein),
        carbs100: scale(data.carbs),
        fiber100: scale(data.fiber),
        sugar100: scale(data.sugar),
        sa100: scale(data.sugar_alcohol),
        added_sugar100: scale(data.added_sugar),
        sodium100: scale(data.sodium),
    }
}

/// Sugar-alcohol factors for a label, matched against the product name.
///
/// Only looked up when the label lists sugar alcohols.
pub fn sugar_alcohol_factors(data: &NutritionData, table: &SugarAlcoholTable) -> SugarAlcoholFactors {
    if data.sugar_alcohol.unwrap_or(0.0) <= 0.0 {
        return SugarAlcoholFactors::NEUTRAL;
    }

    table.lookup(data.product_name.as_deref().unwrap_or(""))
}

/// Net carbs per 100 g: carbs minus fiber minus the offset share of sugar
/// alcohols, never below zero
pub fn net_carbs100(per100: &Per100g, factors: SugarAlcoholFactors) -> f64 {
    let net = per100.carbs100 - per100.fiber100 - per100.sa100 * factors.net_carb_factor;
    net.max(0.0)
}
