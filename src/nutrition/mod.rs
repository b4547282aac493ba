//! Label text parsing
//!
//! Serving size parsing and unit constants.

pub mod serving;
pub mod units;

pub use serving::{parse_serving, parse_serving_weight, ParsedServing};
pub use units::{is_microgram_unit, ServingUnit, G_PER_ML_ASSUMED, MG_PER_UG};
