//! Serving size parsing
//!
//! Turns free-text serving sizes from a label into a gram quantity.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::units::ServingUnit;

// "30 g", "30g", "30 grams"
static GRAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*g(?:rams?)?\b").expect("valid grams pattern")
});

// "240 mL", "240ml", "240 milliliters"
static MILLILITERS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(\d+(?:\.\d+)?)\s*(?:ml|millilit(?:er|re)s?)\b")
        .expect("valid milliliters pattern")
});

// "(28 g)" anywhere in the text
static PAREN_GRAMS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\(\s*(\d+(?:\.\d+)?)\s*g(?:rams?)?\s*\)").expect("valid paren grams pattern")
});

/// A serving weight read from label text
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParsedServing {
    pub grams: f64,
    pub unit: ServingUnit,
    /// True when the grams came from a volume at assumed density
    pub approximate: bool,
}

fn first_number(re: &Regex, text: &str) -> Option<f64> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Parse a serving size string
///
/// Rules, first match wins:
/// - "30 g" -> 30 g
/// - "2 tbsp (30 mL)" -> 30 g (1 g per mL)
/// - "(28 g)" -> 28 g
/// - anything else -> None
pub fn parse_serving(text: &str) -> Option<ParsedServing> {
    let grams = |quantity: f64, unit: ServingUnit| ParsedServing {
        grams: unit.to_grams(quantity),
        unit,
        approximate: unit.is_approximate(),
    };

    if let Some(quantity) = first_number(&GRAMS, text) {
        return Some(grams(quantity, ServingUnit::Grams));
    }

    if let Some(quantity) = first_number(&MILLILITERS, text) {
        return Some(grams(quantity, ServingUnit::Milliliters));
    }

    if let Some(quantity) = first_number(&PAREN_GRAMS, text) {
        return Some(grams(quantity, ServingUnit::Grams));
    }

    tracing::debug!("No serving weight found in '{}'", text);
    None
}

/// Parse a serving size string into grams
pub fn parse_serving_weight(text: &str) -> Option<f64> {
    parse_serving(text).map(|parsed| parsed.grams)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_grams() {
        assert_eq!(parse_serving_weight("30 g"), Some(30.0));
        assert_eq!(parse_serving_weight("30g"), Some(30.0));
        assert_eq!(parse_serving_weight("12.5 G"), Some(12.5));
        assert_eq!(parse_serving_weight("40 grams"), Some(40.0));
    }

    #[test]
    fn test_grams_inside_annotation() {
        assert_eq!(parse_serving_weight("1 cup (240g)"), Some(240.0));
        assert_eq!(parse_serving_weight("1 bar (45 g)"), Some(45.0));
    }

    #[test]
    fn test_milliliters_fallback() {
        let parsed = parse_serving("2 tbsp (30 mL)").unwrap();
        assert_eq!(parsed.grams, 30.0);
        assert_eq!(parsed.unit, ServingUnit::Milliliters);
        assert!(parsed.approximate);

        assert_eq!(parse_serving_weight("250 milliliters"), Some(250.0));
    }

    #[test]
    fn test_grams_win_over_milliliters() {
        let parsed = parse_serving("1 bottle 330 mL (340 g)").unwrap();
        assert_eq!(parsed.grams, 340.0);
        assert_eq!(parsed.unit, ServingUnit::Grams);
        assert!(!parsed.approximate);
    }

    #[test]
    fn test_word_boundary_after_unit() {
        assert_eq!(parse_serving_weight("1 gallon"), None);
        assert_eq!(parse_serving_weight("2 mg"), None);
        assert_eq!(parse_serving_weight("3 glasses"), None);
    }

    #[test]
    fn test_unparseable() {
        assert_eq!(parse_serving_weight("1 slice"), None);
        assert_eq!(parse_serving_weight(""), None);
        assert_eq!(parse_serving_weight("about a handful"), None);
    }
}
