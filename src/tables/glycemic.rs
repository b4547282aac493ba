//! Glycemic index by food name
//!
//! Two-column CSV (`food,gi`), header skipped, file order preserved.

/// A GI table hit
#[derive(Debug, Clone, PartialEq)]
pub struct GiMatch<'a> {
    pub food: &'a str,
    pub gi: f64,
}

/// Food-name GI table in file order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GiTable {
    entries: Vec<(String, f64)>,
}

impl GiTable {
    /// Parse the CSV source, skipping the header and malformed lines.
    ///
    /// A repeated food keeps its first position and takes the later value.
    pub fn parse(csv: &str) -> Self {
        let mut entries: Vec<(String, f64)> = Vec::new();

        for line in csv.trim().lines().skip(1) {
            let mut fields = line.split(',');
            let food = fields.next().unwrap_or("").trim().to_lowercase();
            let gi = fields.next().and_then(leading_integer);

            let (food, gi) = match (food.is_empty(), gi) {
                (false, Some(gi)) => (food, f64::from(gi)),
                _ => {
                    if !line.trim().is_empty() {
                        tracing::debug!("Skipping GI table line '{}'", line);
                    }
                    continue;
                }
            };

            match entries.iter_mut().find(|(key, _)| *key == food) {
                Some(existing) => existing.1 = gi,
                None => entries.push((food, gi)),
            }
        }

        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// First entry where the product name contains the food or the food contains
    /// the product name, case-insensitive. Blank names never match.
    pub fn lookup(&self, product_name: &str) -> Option<GiMatch<'_>> {
        let name = product_name.trim().to_lowercase();
        if name.is_empty() {
            return None;
        }

        self.entries
            .iter()
            .find(|(food, _)| name.contains(food.as_str()) || food.contains(name.as_str()))
            .map(|(food, gi)| GiMatch { food, gi: *gi })
    }
}

/// Integer prefix of a GI field, so "51.0" reads as 51
fn leading_integer(field: &str) -> Option<u16> {
    let field = field.trim();
    let digits = field.find(|c: char| !c.is_ascii_digit()).unwrap_or(field.len());
    field[..digits].parse().ok()
}
