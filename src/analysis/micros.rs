//! %DV micronutrient conversion

use std::collections::BTreeMap;

use crate::tables::DailyValueTable;

/// Milligrams for a %DV reading, if the nutrient has a daily value
pub fn dv_to_mg(nutrient: &str, dv_percent: f64, table: &DailyValueTable) -> Option<f64> {
    table
        .amount_mg(nutrient)
        .map(|dv_amount| (dv_percent / 100.0) * dv_amount)
}

/// Convert %DV readings to milligrams.
///
/// Nutrients without a daily value, or that come out at zero or less, are
/// left out rather than reported as zero.
pub fn convert_micros(
    micros: &BTreeMap<String, f64>,
    table: &DailyValueTable,
) -> BTreeMap<String, f64> {
    micros
        .iter()
        .filter_map(|(name, dv_percent)| {
            let mg = dv_to_mg(name, *dv_percent, table);
            if mg.is_none() {
                tracing::debug!("No daily value for micronutrient '{}'", name);
            }
            mg.filter(|mg| *mg > 0.0).map(|mg| (name.clone(), mg))
        })
        .collect()
}
