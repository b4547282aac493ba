//! Keto score and warnings

use crate::config::Thresholds;
use crate::models::Per100gProfile;

const NET_CARB_PENALTY: f64 = 6.0;
const FAT_RATIO_PENALTY: f64 = 150.0;
const CARB_SHARE_PENALTY: f64 = 5.0;
const GLYCEMIC_LOAD_PENALTY: f64 = 10.0;
const ADDED_SUGAR_PENALTY: f64 = 10.0;

pub const WARNING_ADDED_SUGAR: &str = "High added sugar";
pub const WARNING_SAT_FAT: &str = "High saturated fat ratio";
pub const WARNING_SODIUM: &str = "Very high sodium";
pub const WARNING_LABEL: &str = "Label inconsistency";

/// Percent of calories from net carbs; zero without calories
pub fn pct_carb(net_carb100: f64, kcal100: f64) -> f64 {
    if kcal100 > 0.0 {
        4.0 * net_carb100 / kcal100 * 100.0
    } else {
        0.0
    }
}

pub fn glycemic_load(gi: f64, net_carb100: f64) -> f64 {
    gi * net_carb100 / 100.0
}

/// Saturated share of total fat; zero without fat
pub fn sat_ratio(sat_fat100: f64, fat100: f64) -> f64 {
    if fat100 > 0.0 {
        sat_fat100 / fat100
    } else {
        0.0
    }
}

/// 0-100 score. Penalties add up unclamped and the total is clamped once.
pub fn keto_score(profile: &Per100gProfile, thresholds: &Thresholds) -> f64 {
    let mut score = 100.0;

    score -= NET_CARB_PENALTY * profile.net_carb100;
    score -= FAT_RATIO_PENALTY * (1.0 - profile.r).max(0.0);

    if profile.pct_carb > thresholds.pct_carb_limit {
        score -= CARB_SHARE_PENALTY;
    }
    if profile.gl100 > thresholds.glycemic_load_limit {
        score -= GLYCEMIC_LOAD_PENALTY;
    }
    if profile.added_sugar100 > 0.0 {
        score -= ADDED_SUGAR_PENALTY;
    }

    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Human-readable warnings, in fixed order
pub fn warnings(profile: &Per100gProfile, calorie_mismatch: bool, thresholds: &Thresholds) -> Vec<String> {
    [
        (profile.added_sugar100 > 0.0, WARNING_ADDED_SUGAR),
        (profile.sat_ratio > thresholds.sat_ratio_limit, WARNING_SAT_FAT),
        (profile.sodium_density > thresholds.sodium_limit_mg, WARNING_SODIUM),
        (calorie_mismatch, WARNING_LABEL),
    ]
    .into_iter()
    .filter(|(raised, _)| *raised)
    .map(|(_, warning)| warning.to_string())
    .collect()
}
