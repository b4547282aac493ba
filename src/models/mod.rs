//! Data models
//!
//! Label input records and analysis output records.

mod keto_result;
mod nutrition;

pub use keto_result::{GiConfidence, KetoMathResult, MacroShares, Per100gProfile, Verdict};
pub use nutrition::{NutritionData, NutritionDataUpdate};
