//! FDA %Daily Value reference amounts
//!
//! CSV with columns `nutrient,value,unit`. Amounts are stored in milligrams;
//! microgram rows are converted when loaded.

use std::collections::HashMap;

use crate::nutrition::{is_microgram_unit, MG_PER_UG};

/// Nutrient name (lower-cased) -> 100% DV in mg
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DailyValueTable {
    amounts_mg: HashMap<String, f64>,
}

impl DailyValueTable {
    /// Parse the CSV source, skipping the header and malformed lines.
    pub fn parse(csv: &str) -> Self {
        let mut amounts_mg = HashMap::new();

        for line in csv.trim().lines().skip(1) {
            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            let nutrient = fields.first().map(|s| s.to_lowercase()).unwrap_or_default();
            let value = fields.get(1).and_then(|s| s.parse::<f64>().ok());

            let value = match value {
                Some(v) if !nutrient.is_empty() && v.is_finite() => v,
                _ => {
                    if !line.trim().is_empty() {
                        tracing::debug!("Skipping daily value line '{}'", line);
                    }
                    continue;
                }
            };

            let unit = fields.get(2).copied().unwrap_or("mg");
            let factor = if is_microgram_unit(unit) { MG_PER_UG } else { 1.0 };

            amounts_mg.insert(nutrient, value * factor);
        }

        Self { amounts_mg }
    }

    pub fn len(&self) -> usize {
        self.amounts_mg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts_mg.is_empty()
    }

    /// 100% DV in milligrams, exact case-insensitive name match
    pub fn amount_mg(&self, nutrient: &str) -> Option<f64> {
        self.amounts_mg.get(&nutrient.trim().to_lowercase()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "nutrient,value,unit\n\
        Calcium,1300,mg\n\
        vitamin d,20,µg\n\
        folate,400,mcg\n\
        iron\n\
        zinc,eleven,mg\n";

    #[test]
    fn test_parse_converts_micrograms() {
        let table = DailyValueTable::parse(CSV);
        assert_eq!(table.len(), 3);
        assert_eq!(table.amount_mg("calcium"), Some(1300.0));
        assert!((table.amount_mg("Vitamin D").unwrap() - 0.02).abs() < 1e-12);
        assert!((table.amount_mg("FOLATE").unwrap() - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_missing_nutrient() {
        let table = DailyValueTable::parse(CSV);
        assert_eq!(table.amount_mg("iron"), None);
        assert_eq!(table.amount_mg("zinc"), None);
    }
}
