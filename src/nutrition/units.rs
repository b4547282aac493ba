//! Serving unit types and conversion constants

use serde::{Deserialize, Serialize};

/// Unit a serving weight was read from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServingUnit {
    /// Grams printed on the label
    Grams,
    /// Milliliters, converted with an assumed density
    Milliliters,
}

impl ServingUnit {
    /// Whether the gram amount is an approximation
    pub fn is_approximate(&self) -> bool {
        matches!(self, ServingUnit::Milliliters)
    }

    /// Convert a quantity in this unit to grams
    pub fn to_grams(&self, quantity: f64) -> f64 {
        match self {
            ServingUnit::Grams => quantity,
            ServingUnit::Milliliters => quantity * G_PER_ML_ASSUMED,
        }
    }
}

// ============================================================================
// Conversion Constants
// ============================================================================

/// Density assumed for every liquid (water). No per-food density table.
pub const G_PER_ML_ASSUMED: f64 = 1.0;

/// Milligrams per microgram
pub const MG_PER_UG: f64 = 0.001;

/// Whether a unit string denotes micrograms
pub fn is_microgram_unit(unit: &str) -> bool {
    matches!(
        unit.trim().to_lowercase().as_str(),
        "µg" | "μg" | "mcg" | "ug"
    )
}
