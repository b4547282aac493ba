//! Food category -> GI estimate table

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// GI estimate for a food category
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct CategoryGi {
    pub gi: f64,
    /// Confidence in the estimate, in [0, 1]
    pub confidence: f64,
}

/// Category label (lower-cased) -> GI estimate
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGiTable {
    entries: HashMap<String, CategoryGi>,
}

impl CategoryGiTable {
    /// Parse the JSON source: an object keyed by category label.
    pub fn parse(json: &str) -> Self {
        let map = match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => map,
            Ok(_) => {
                tracing::warn!("Category GI table is not a JSON object");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!("Category GI table is not valid JSON: {}", e);
                return Self::default();
            }
        };

        let entries = map
            .into_iter()
            .filter_map(|(label, record)| {
                let label = label.trim().to_lowercase();
                let entry = serde_json::from_value::<CategoryGi>(record).ok()?;
                let valid = !label.is_empty()
                    && entry.gi.is_finite()
                    && (0.0..=1.0).contains(&entry.confidence);
                if !valid {
                    tracing::debug!("Skipping category GI record '{}'", label);
                }
                valid.then_some((label, entry))
            })
            .collect();

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-insensitive lookup
    pub fn get(&self, category: &str) -> Option<CategoryGi> {
        self.entries.get(&category.trim().to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_get() {
        let table = CategoryGiTable::parse(
            r#"{
                "rice product": {"gi": 80, "confidence": 0.7},
                "high-GI sweetener": {"gi": 70, "confidence": 0.6},
                "bad": {"gi": "high"},
                "overconfident": {"gi": 10, "confidence": 2.0}
            }"#,
        );
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.get("Rice Product"),
            Some(CategoryGi { gi: 80.0, confidence: 0.7 })
        );
        assert_eq!(table.get("high-GI sweetener").map(|c| c.gi), Some(70.0));
        assert_eq!(table.get("rice"), None);
    }

    #[test]
    fn test_parse_invalid_document() {
        assert!(CategoryGiTable::parse("[1, 2]").is_empty());
        assert!(CategoryGiTable::parse("{").is_empty());
    }
}
