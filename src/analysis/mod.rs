//! Keto analysis pipeline
//!
//! Turns one [`NutritionData`] label into a [`KetoMathResult`]:
//! serving weight -> per-100 g normalization -> net carbs -> calories,
//! fat dominance and score, with GI resolution and micronutrients merged in.
//! The pipeline is pure; the only shared state is the read-only
//! [`ReferenceTables`].

pub mod calories;
pub mod category;
pub mod fat_dominance;
pub mod glycemic;
pub mod micros;
pub mod normalize;
pub mod score;

use thiserror::Error;

use crate::config::Thresholds;
use crate::models::{KetoMathResult, NutritionData, Per100gProfile};
use crate::tables::{reference_tables, ReferenceTables};

pub use calories::{reconcile_calories, reconstruct_kcal100, CalorieCheck};
pub use category::{categorize, FoodCategory, FoodCategoryKind};
pub use fat_dominance::{classify, fat_dominance_ratio, macro_shares};
pub use glycemic::{resolve_gi, resolve_gi_with_category, GiResolution};
pub use micros::{convert_micros, dv_to_mg};
pub use normalize::{net_carbs100, normalize, sugar_alcohol_factors, Per100g};
pub use score::{glycemic_load, keto_score, pct_carb, sat_ratio, warnings};

/// Analysis error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// No usable serving weight, so nothing can be normalized
    #[error("Serving weight unavailable (serving size: {})", .serving_size.as_deref().unwrap_or("none"))]
    MissingServingWeight { serving_size: Option<String> },
}

/// Result type for analysis operations
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Runs the analysis pipeline against a set of reference tables
#[derive(Debug, Clone, Copy)]
pub struct KetoAnalyzer<'a> {
    tables: &'a ReferenceTables,
    thresholds: Thresholds,
}

impl<'a> KetoAnalyzer<'a> {
    pub fn new(tables: &'a ReferenceTables) -> Self {
        Self {
            tables,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_thresholds(mut self, thresholds: Thresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn tables(&self) -> &'a ReferenceTables {
        self.tables
    }

    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    /// Analyse one label
    pub fn analyze(&self, data: &NutritionData) -> AnalysisResult<KetoMathResult> {
        let serving_weight_g =
            data.resolved_serving_weight()
                .ok_or_else(|| AnalysisError::MissingServingWeight {
                    serving_size: data.serving_size.clone(),
                })?;

        let per100 = normalize(data, serving_weight_g);
        let sa_factors = sugar_alcohol_factors(data, &self.tables.sugar_alcohols);
        let net_carb100 = net_carbs100(&per100, sa_factors);

        let kcal100 = reconstruct_kcal100(
            per100.fat100,
            per100.protein100,
            net_carb100,
            per100.sa100,
            sa_factors.kcal_per_g,
        );
        let calorie_check = reconcile_calories(
            kcal100,
            data.calories,
            per100.factor100,
            self.thresholds.calorie_tolerance,
        );

        let r = fat_dominance_ratio(per100.fat100, per100.protein100, net_carb100);
        let verdict = classify(net_carb100, r, &self.thresholds);

        let category = categorize(data.ingredients.as_deref(), &self.tables.categories);
        let gi = resolve_gi_with_category(
            data.gi,
            data.product_name.as_deref(),
            &category,
            &self.tables.gi_foods,
        );

        let per100g = Per100gProfile {
            fat100: per100.fat100,
            sat_fat100: per100.sat_fat100,
            trans_fat100: per100.trans_fat100,
            protein100: per100.protein100,
            carbs100: per100.carbs100,
            fiber100: per100.fiber100,
            sugar100: per100.sugar100,
            sa100: per100.sa100,
            added_sugar100: per100.added_sugar100,
            net_carb100,
            kcal100,
            gi: gi.gi,
            gl100: glycemic_load(gi.gi, net_carb100),
            r,
            pct_carb: pct_carb(net_carb100, kcal100),
            sat_ratio: sat_ratio(per100.sat_fat100, per100.fat100),
            sodium_density: per100.sodium100,
            macro_shares: macro_shares(per100.fat100, per100.protein100, net_carb100),
        };

        let keto_score = keto_score(&per100g, &self.thresholds);
        let warnings = warnings(&per100g, calorie_check.mismatch, &self.thresholds);
        let micros_per100g = convert_micros(&data.micros, &self.tables.daily_values);

        tracing::debug!(
            "Analysed '{}': net carbs {:.2} g, R {:.2}, score {:.1}",
            data.product_name.as_deref().unwrap_or("unnamed"),
            net_carb100,
            r,
            keto_score
        );

        Ok(KetoMathResult {
            per100g,
            verdict,
            calorie_mismatch: calorie_check.mismatch,
            original_kcal100: calorie_check.original_kcal100,
            gi_confidence: gi.confidence,
            keto_score,
            micros_per100g,
            warnings,
            food_category: category.category.label().to_string(),
            claims: data.claims.clone(),
        })
    }
}

/// Analyse a label with the process-wide tables and default thresholds
pub fn analyze(data: &NutritionData) -> AnalysisResult<KetoMathResult> {
    KetoAnalyzer::new(reference_tables()).analyze(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::GiConfidence;
    use proptest::prelude::*;

    fn scenario_label() -> NutritionData {
        NutritionData {
            serving_size: Some("30 g".to_string()),
            fat: Some(5.0),
            protein: Some(8.0),
            carbs: Some(20.0),
            fiber: Some(3.0),
            calories: Some(150.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_serving_weight_is_unavailable() {
        let tables = ReferenceTables::embedded();
        let analyzer = KetoAnalyzer::new(&tables);

        let data = NutritionData {
            serving_size: Some("1 slice".to_string()),
            fat: Some(10.0),
            ..Default::default()
        };
        assert_eq!(
            analyzer.analyze(&data),
            Err(AnalysisError::MissingServingWeight {
                serving_size: Some("1 slice".to_string())
            })
        );

        let data = NutritionData {
            serving_weight_g: Some(0.0),
            ..scenario_label()
        };
        assert!(analyzer.analyze(&data).is_err());
        assert!(analyzer.analyze(&NutritionData::default()).is_err());
    }

    #[test]
    fn test_high_carb_scenario() {
        let tables = ReferenceTables::embedded();
        let result = KetoAnalyzer::new(&tables).analyze(&scenario_label()).unwrap();
        let p = &result.per100g;

        assert!((p.fat100 - 16.667).abs() < 0.01);
        assert!((p.protein100 - 26.667).abs() < 0.01);
        assert!((p.carbs100 - 66.667).abs() < 0.01);
        assert!((p.fiber100 - 10.0).abs() < 0.01);
        assert!((p.net_carb100 - 56.667).abs() < 0.01);
        assert!((p.kcal100 - 483.33).abs() < 0.01);
        assert!((p.r - 0.45).abs() < 0.001);
        let shares = p.macro_shares.unwrap();
        assert!((shares.fat_pct - 16.667).abs() < 0.01);
        assert!((shares.fat_pct + shares.protein_pct + shares.net_carb_pct - 100.0).abs() < 1e-9);

        assert!(!result.verdict.passes_r);
        assert!(!result.verdict.passes_net);
        assert!(!result.verdict.keto_ok);

        assert!((result.original_kcal100.unwrap() - 500.0).abs() < 1e-9);
        assert!(!result.calorie_mismatch);
        assert_eq!(result.keto_score, 0.0);
    }

    #[test]
    fn test_keto_product() {
        let tables = ReferenceTables::embedded();
        let data = NutritionData {
            product_name: Some("Macadamia Fat Bomb".to_string()),
            serving_size: Some("2 tbsp (32 g)".to_string()),
            calories: Some(200.0),
            fat: Some(20.0),
            sat_fat: Some(8.0),
            protein: Some(3.0),
            carbs: Some(3.0),
            fiber: Some(2.0),
            sodium: Some(40.0),
            ingredients: Some("macadamia nuts, coconut oil".to_string()),
            claims: vec!["keto".to_string()],
            ..Default::default()
        };
        let result = KetoAnalyzer::new(&tables).analyze(&data).unwrap();

        assert!(result.verdict.keto_ok);
        assert_eq!(result.food_category, "nut butter / fat bomb");
        assert!(result.keto_score > 80.0);
        assert!(result.warnings.is_empty());
        assert_eq!(result.claims, vec!["keto".to_string()]);
    }

    #[test]
    fn test_sugar_alcohol_adjustment() {
        let tables = ReferenceTables::embedded();
        let data = NutritionData {
            product_name: Some("Dark Chocolate with Erythritol".to_string()),
            serving_weight_g: Some(100.0),
            fat: Some(40.0),
            protein: Some(8.0),
            carbs: Some(30.0),
            fiber: Some(10.0),
            sugar_alcohol: Some(18.0),
            ..Default::default()
        };
        let result = KetoAnalyzer::new(&tables).analyze(&data).unwrap();

        // erythritol is fully subtracted and counts 0.2 kcal/g
        assert!((result.per100g.net_carb100 - 2.0).abs() < 1e-9);
        assert!((result.per100g.kcal100 - (360.0 + 32.0 + 8.0 + 3.6)).abs() < 1e-9);
        assert_eq!(result.gi_confidence, GiConfidence::Table);
    }

    #[test]
    fn test_warnings_and_mismatch() {
        let tables = ReferenceTables::embedded();
        let data = NutritionData {
            serving_size: Some("50 g".to_string()),
            calories: Some(400.0),
            fat: Some(10.0),
            sat_fat: Some(8.0),
            protein: Some(2.0),
            carbs: Some(5.0),
            added_sugar: Some(1.0),
            sodium: Some(400.0),
            ..Default::default()
        };
        let result = KetoAnalyzer::new(&tables).analyze(&data).unwrap();
        assert_eq!(
            result.warnings,
            vec![
                "High added sugar",
                "High saturated fat ratio",
                "Very high sodium",
                "Label inconsistency"
            ]
        );
    }

    #[test]
    fn test_custom_tolerance() {
        let tables = ReferenceTables::embedded();
        let thresholds = Thresholds {
            calorie_tolerance: 0.01,
            ..Thresholds::default()
        };
        let result = KetoAnalyzer::new(&tables)
            .with_thresholds(thresholds)
            .analyze(&scenario_label())
            .unwrap();
        assert!(result.calorie_mismatch);
        assert_eq!(result.warnings, vec!["Label inconsistency"]);
    }

    #[test]
    fn test_unknown_product_defaults() {
        let tables = ReferenceTables::embedded();
        let result = KetoAnalyzer::new(&tables).analyze(&scenario_label()).unwrap();
        assert_eq!(result.per100g.gi, 50.0);
        assert_eq!(result.gi_confidence.to_string(), "heuristic-0.4");
        assert_eq!(result.food_category, "mixed / unknown");
    }

    #[test]
    fn test_micros_merged() {
        let tables = ReferenceTables::embedded();
        let mut data = scenario_label();
        data.micros.insert("Vitamin D".to_string(), 50.0);
        data.micros.insert("Glitter".to_string(), 10.0);
        let result = KetoAnalyzer::new(&tables).analyze(&data).unwrap();
        assert_eq!(result.micros_per100g.len(), 1);
        assert!((result.micros_per100g["Vitamin D"] - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_global_analyze_matches_embedded() {
        let tables = ReferenceTables::embedded();
        let local = KetoAnalyzer::new(&tables).analyze(&scenario_label());
        assert_eq!(analyze(&scenario_label()), local);
    }

    fn label_strategy() -> impl Strategy<Value = NutritionData> {
        (
            0.01f64..1e6,
            prop::array::uniform8(prop::option::of(0.0f64..1e7)),
            prop::option::of(0.0f64..150.0),
            prop::option::of("[a-z ]{0,20}"),
        )
            .prop_map(|(weight, n, gi, name)| NutritionData {
                product_name: name,
                serving_weight_g: Some(weight),
                calories: n[0],
                fat: n[1],
                sat_fat: n[2],
                protein: n[3],
                carbs: n[4],
                fiber: n[5],
                sugar_alcohol: n[6],
                added_sugar: n[7],
                gi,
                ..Default::default()
            })
    }

    proptest! {
        #[test]
        fn prop_net_carbs_and_score_in_range(data in label_strategy()) {
            let tables = ReferenceTables::embedded();
            let result = KetoAnalyzer::new(&tables).analyze(&data).unwrap();
            prop_assert!(result.per100g.net_carb100 >= 0.0);
            prop_assert!((0.0..=100.0).contains(&result.keto_score));
            prop_assert!(result.per100g.r >= 0.0);
        }

        #[test]
        fn prop_analysis_is_idempotent(data in label_strategy()) {
            let tables = ReferenceTables::embedded();
            let analyzer = KetoAnalyzer::new(&tables);
            let first = serde_json::to_string(&analyzer.analyze(&data).unwrap()).unwrap();
            let second = serde_json::to_string(&analyzer.analyze(&data).unwrap()).unwrap();
            prop_assert_eq!(first, second);
        }

        #[test]
        fn prop_non_positive_weight_unavailable(weight in -1e6f64..=0.0) {
            let tables = ReferenceTables::embedded();
            let data = NutritionData { serving_weight_g: Some(weight), ..Default::default() };
            prop_assert!(KetoAnalyzer::new(&tables).analyze(&data).is_err());
        }
    }
}
