//! Fat-dominance ratio and keto verdict

use super::calories::{KCAL_PER_G_CARB, KCAL_PER_G_FAT};
use crate::config::Thresholds;
use crate::models::{MacroShares, Verdict};

/// Calories from fat over calories from protein plus net carbs.
///
/// Zero when there is no fat; infinite for pure fat.
pub fn fat_dominance_ratio(fat100: f64, protein100: f64, net_carb100: f64) -> f64 {
    if fat100 > 0.0 {
        (KCAL_PER_G_FAT * fat100) / (KCAL_PER_G_CARB * (protein100 + net_carb100))
    } else {
        0.0
    }
}

/// Gram shares of fat, protein and net carbs. None when all three are zero.
pub fn macro_shares(fat100: f64, protein100: f64, net_carb100: f64) -> Option<MacroShares> {
    let total = fat100 + protein100 + net_carb100;
    if total <= 0.0 {
        return None;
    }

    Some(MacroShares {
        fat_pct: fat100 / total * 100.0,
        protein_pct: protein100 / total * 100.0,
        net_carb_pct: net_carb100 / total * 100.0,
    })
}

/// Both gates must pass for a product to be keto
pub fn classify(net_carb100: f64, r: f64, thresholds: &Thresholds) -> Verdict {
    let passes_net = net_carb100 < thresholds.net_carb_limit;
    let passes_r = r >= thresholds.min_fat_ratio;

    Verdict {
        keto_ok: passes_net && passes_r,
        passes_net,
        passes_r,
    }
}
