//! Calorie reconstruction and label reconciliation

/// kcal per gram of fat
pub const KCAL_PER_G_FAT: f64 = 9.0;
/// kcal per gram of protein
pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
/// kcal per gram of net carbohydrate
pub const KCAL_PER_G_CARB: f64 = 4.0;

/// Reconstructed calories compared against the label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalorieCheck {
    pub kcal100: f64,
    pub original_kcal100: Option<f64>,
    pub mismatch: bool,
}

/// Calories per 100 g rebuilt from macros, counting sugar alcohols at their
/// own energy density
pub fn reconstruct_kcal100(
    fat100: f64,
    protein100: f64,
    net_carb100: f64,
    sa100: f64,
    sa_kcal_per_g: f64,
) -> f64 {
    KCAL_PER_G_FAT * fat100
        + KCAL_PER_G_PROTEIN * protein100
        + KCAL_PER_G_CARB * net_carb100
        + sa100 * sa_kcal_per_g
}

/// Compare reconstructed calories with the label's stated calories.
///
/// Labels without a positive calorie value are not checked.
pub fn reconcile_calories(
    kcal100: f64,
    label_calories: Option<f64>,
    factor100: f64,
    tolerance: f64,
) -> CalorieCheck {
    let original_kcal100 = label_calories
        .filter(|kcal| *kcal > 0.0)
        .map(|kcal| kcal * factor100);

    let mismatch = original_kcal100
        .map(|original| (kcal100 - original).abs() / original > tolerance)
        .unwrap_or(false);

    if mismatch {
        tracing::debug!(
            "Calorie mismatch: reconstructed {:.1} kcal vs label {:.1} kcal per 100 g",
            kcal100,
            original_kcal100.unwrap_or(0.0)
        );
    }

    CalorieCheck {
        kcal100,
        original_kcal100,
        mismatch,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reconstruct() {
        assert_eq!(reconstruct_kcal100(10.0, 5.0, 2.0, 0.0, 0.0), 118.0);
        assert_eq!(reconstruct_kcal100(0.0, 0.0, 0.0, 10.0, 2.4), 24.0);
    }

    #[test]
    fn test_within_tolerance() {
        let check = reconcile_calories(483.3, Some(150.0), 100.0 / 30.0, 0.2);
        assert!((check.original_kcal100.unwrap() - 500.0).abs() < 1e-9);
        assert!(!check.mismatch);
    }

    #[test]
    fn test_outside_tolerance() {
        let check = reconcile_calories(300.0, Some(400.0), 1.0, 0.2);
        assert!(check.mismatch);

        // exactly at tolerance is not a mismatch
        let check = reconcile_calories(80.0, Some(100.0), 1.0, 0.2);
        assert!(!check.mismatch);
    }

    #[test]
    fn test_no_label_calories() {
        let check = reconcile_calories(300.0, None, 1.0, 0.2);
        assert_eq!(check.original_kcal100, None);
        assert!(!check.mismatch);

        let check = reconcile_calories(300.0, Some(0.0), 1.0, 0.2);
        assert_eq!(check.original_kcal100, None);
        assert!(!check.mismatch);
    }
}
