//! Food category heuristic
//!
//! Classifies an ingredient list into a coarse category with a GI estimate.
//! Rules are checked in a fixed order against the lower-cased ingredient text
//! and the first match wins.

use serde::Serialize;

use crate::tables::CategoryGiTable;

/// GI used when nothing better is known
pub const DEFAULT_GI: f64 = 50.0;
/// Confidence attached to [`DEFAULT_GI`]
pub const DEFAULT_CONFIDENCE: f64 = 0.4;

/// Largest ingredient list that can count as a nut butter / fat bomb
const FAT_BOMB_MAX_ITEMS: usize = 3;

const WHITE_FLOURS: &[&str] = &["wheat flour", "white flour", "enriched flour"];
const HIGH_GI_SWEETENERS: &[&str] = &["isomaltulose", "fructose", "honey", "corn syrup", "sugar"];
const NUT_OR_OIL: &[&str] = &["oil", "nut", "almond", "peanut", "coconut", "butter", "seed"];

/// Coarse food category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FoodCategoryKind {
    #[serde(rename = "nut-flour bakery")]
    NutFlourBakery,
    #[serde(rename = "white-flour bakery")]
    WhiteFlourBakery,
    #[serde(rename = "rice product")]
    RiceProduct,
    #[serde(rename = "high-GI sweetener")]
    HighGiSweetener,
    #[serde(rename = "nut butter / fat bomb")]
    NutButterFatBomb,
    #[serde(rename = "mixed / unknown")]
    MixedUnknown,
}

impl FoodCategoryKind {
    /// Label used as the category table key
    pub fn label(&self) -> &'static str {
        match self {
            FoodCategoryKind::NutFlourBakery => "nut-flour bakery",
            FoodCategoryKind::WhiteFlourBakery => "white-flour bakery",
            FoodCategoryKind::RiceProduct => "rice product",
            FoodCategoryKind::HighGiSweetener => "high-GI sweetener",
            FoodCategoryKind::NutButterFatBomb => "nut butter / fat bomb",
            FoodCategoryKind::MixedUnknown => "mixed / unknown",
        }
    }
}

/// Category with its GI estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCategory {
    pub category: FoodCategoryKind,
    pub gi_estimate: f64,
    pub confidence: f64,
}

impl FoodCategory {
    /// Mixed / unknown with the built-in default estimate
    pub const fn unknown() -> Self {
        Self {
            category: FoodCategoryKind::MixedUnknown,
            gi_estimate: DEFAULT_GI,
            confidence: DEFAULT_CONFIDENCE,
        }
    }

    fn from_table(kind: FoodCategoryKind, table: &CategoryGiTable) -> Self {
        match table.get(kind.label()) {
            Some(entry) => Self {
                category: kind,
                gi_estimate: entry.gi,
                confidence: entry.confidence,
            },
            None => {
                tracing::debug!("No GI estimate for category '{}'", kind.label());
                Self {
                    category: kind,
                    ..Self::unknown()
                }
            }
        }
    }
}

fn contains_any(text: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| text.contains(needle))
}

fn classify(ingredients: &str) -> FoodCategoryKind {
    if ingredients.contains("almond flour") {
        return FoodCategoryKind::NutFlourBakery;
    }

    if contains_any(ingredients, WHITE_FLOURS) {
        return FoodCategoryKind::WhiteFlourBakery;
    }

    if ingredients.contains("rice") {
        return FoodCategoryKind::RiceProduct;
    }

    if contains_any(ingredients, HIGH_GI_SWEETENERS) {
        return FoodCategoryKind::HighGiSweetener;
    }

    let items: Vec<&str> = ingredients.split(',').map(str::trim).collect();
    if items.len() <= FAT_BOMB_MAX_ITEMS && items.iter().all(|item| contains_any(item, NUT_OR_OIL)) {
        return FoodCategoryKind::NutButterFatBomb;
    }

    FoodCategoryKind::MixedUnknown
}

/// Categorize an ingredient list
///
/// Absent or blank ingredient text is mixed / unknown with the default estimate.
pub fn categorize(ingredients: Option<&str>, table: &CategoryGiTable) -> FoodCategory {
    let text = match ingredients.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_lowercase(),
        _ => return FoodCategory::unknown(),
    };

    FoodCategory::from_table(classify(&text), table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::ReferenceTables;

    fn kind(ingredients: &str) -> FoodCategoryKind {
        categorize(Some(ingredients), &ReferenceTables::embedded().categories).category
    }

    #[test]
    fn test_almond_flour_beats_fat_bomb() {
        assert_eq!(kind("almond flour, eggs, butter"), FoodCategoryKind::NutFlourBakery);
    }

    #[test]
    fn test_white_flour() {
        assert_eq!(kind("Enriched Flour, water, yeast"), FoodCategoryKind::WhiteFlourBakery);
        assert_eq!(kind("whole wheat flour, salt"), FoodCategoryKind::WhiteFlourBakery);
    }

    #[test]
    fn test_rice_before_sweetener() {
        assert_eq!(kind("brown rice syrup, sugar"), FoodCategoryKind::RiceProduct);
    }

    #[test]
    fn test_sweeteners() {
        assert_eq!(kind("oats, honey"), FoodCategoryKind::HighGiSweetener);
        assert_eq!(kind("water, high fructose corn syrup"), FoodCategoryKind::HighGiSweetener);
    }

    #[test]
    fn test_fat_bomb() {
        assert_eq!(kind("peanuts, palm oil, sea salt"), FoodCategoryKind::MixedUnknown);
        assert_eq!(kind("roasted peanuts, peanut oil"), FoodCategoryKind::NutButterFatBomb);
        assert_eq!(kind("cocoa butter, coconut oil, sunflower seeds"), FoodCategoryKind::NutButterFatBomb);
    }

    #[test]
    fn test_fat_bomb_limited_to_three_items() {
        assert_eq!(
            kind("almonds, cashews, walnuts, peanut oil"),
            FoodCategoryKind::MixedUnknown
        );
    }

    #[test]
    fn test_estimates_come_from_table() {
        let tables = ReferenceTables::embedded();
        let category = categorize(Some("white rice, salt"), &tables.categories);
        let expected = tables.categories.get("rice product").unwrap();
        assert_eq!(category.gi_estimate, expected.gi);
        assert_eq!(category.confidence, expected.confidence);
    }

    #[test]
    fn test_blank_ingredients_default() {
        let tables = ReferenceTables::embedded();
        assert_eq!(categorize(None, &tables.categories), FoodCategory::unknown());
        assert_eq!(categorize(Some("   "), &tables.categories), FoodCategory::unknown());
    }

    #[test]
    fn test_missing_table_entry_uses_default_estimate() {
        let category = categorize(Some("rice"), &CategoryGiTable::default());
        assert_eq!(category.category, FoodCategoryKind::RiceProduct);
        assert_eq!(category.gi_estimate, DEFAULT_GI);
        assert_eq!(category.confidence, DEFAULT_CONFIDENCE);
    }
}
