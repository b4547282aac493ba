//! Reference tables
//!
//! Immutable lookup tables loaded once per process: sugar-alcohol factors,
//! GI by food name, GI by food category, and FDA daily values. Analysis code
//! takes `&ReferenceTables` so tests can substitute their own.

pub mod category;
pub mod daily_value;
pub mod glycemic;
pub mod sugar_alcohol;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Serialize;
use thiserror::Error;

pub use category::{CategoryGi, CategoryGiTable};
pub use daily_value::DailyValueTable;
pub use glycemic::{GiMatch, GiTable};
pub use sugar_alcohol::{SugarAlcoholEntry, SugarAlcoholFactors, SugarAlcoholTable};

pub const SUGAR_ALCOHOLS_FILE: &str = "sugar_alcohols.json";
pub const GI_MASTER_FILE: &str = "gi_master.csv";
pub const CATEGORY_GI_FILE: &str = "category_gi.json";
pub const FDA_DV_FILE: &str = "fda_dv_2024.csv";

static EMBEDDED_SUGAR_ALCOHOLS: &str = include_str!("../../data/sugar_alcohols.json");
static EMBEDDED_GI_MASTER: &str = include_str!("../../data/gi_master.csv");
static EMBEDDED_CATEGORY_GI: &str = include_str!("../../data/category_gi.json");
static EMBEDDED_FDA_DV: &str = include_str!("../../data/fda_dv_2024.csv");

/// Reference table error types
#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read table file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for table loading
pub type TableResult<T> = Result<T, TableError>;

/// Raw contents of the four table sources
#[derive(Debug, Clone, Copy)]
pub struct TableSources<'a> {
    pub sugar_alcohols_json: &'a str,
    pub gi_master_csv: &'a str,
    pub category_gi_json: &'a str,
    pub fda_dv_csv: &'a str,
}

impl TableSources<'static> {
    /// Tables compiled into the binary
    pub fn embedded() -> Self {
        Self {
            sugar_alcohols_json: EMBEDDED_SUGAR_ALCOHOLS,
            gi_master_csv: EMBEDDED_GI_MASTER,
            category_gi_json: EMBEDDED_CATEGORY_GI,
            fda_dv_csv: EMBEDDED_FDA_DV,
        }
    }
}

/// Entry counts, for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TableCounts {
    pub sugar_alcohols: usize,
    pub gi_foods: usize,
    pub categories: usize,
    pub daily_values: usize,
}

/// All reference tables
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceTables {
    pub sugar_alcohols: SugarAlcoholTable,
    pub gi_foods: GiTable,
    pub categories: CategoryGiTable,
    pub daily_values: DailyValueTable,
}

impl ReferenceTables {
    /// Build tables from source text. Malformed rows are skipped.
    pub fn from_sources(sources: &TableSources<'_>) -> Self {
        let tables = Self {
            sugar_alcohols: SugarAlcoholTable::parse(sources.sugar_alcohols_json),
            gi_foods: GiTable::parse(sources.gi_master_csv),
            categories: CategoryGiTable::parse(sources.category_gi_json),
            daily_values: DailyValueTable::parse(sources.fda_dv_csv),
        };

        let counts = tables.counts();
        tracing::info!(
            "Loaded reference tables: {} sugar alcohols, {} GI foods, {} categories, {} daily values",
            counts.sugar_alcohols,
            counts.gi_foods,
            counts.categories,
            counts.daily_values
        );

        tables
    }

    /// Tables compiled into the binary
    pub fn embedded() -> Self {
        Self::from_sources(&TableSources::embedded())
    }

    /// Load the four table files from a directory
    pub fn load_dir<P: AsRef<Path>>(dir: P) -> TableResult<Self> {
        let dir = dir.as_ref();
        let read = |name: &str| -> TableResult<String> {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| TableError::Io { path, source })
        };

        let sugar_alcohols_json = read(SUGAR_ALCOHOLS_FILE)?;
        let gi_master_csv = read(GI_MASTER_FILE)?;
        let category_gi_json = read(CATEGORY_GI_FILE)?;
        let fda_dv_csv = read(FDA_DV_FILE)?;

        Ok(Self::from_sources(&TableSources {
            sugar_alcohols_json: &sugar_alcohols_json,
            gi_master_csv: &gi_master_csv,
            category_gi_json: &category_gi_json,
            fda_dv_csv: &fda_dv_csv,
        }))
    }

    pub fn counts(&self) -> TableCounts {
        TableCounts {
            sugar_alcohols: self.sugar_alcohols.len(),
            gi_foods: self.gi_foods.len(),
            categories: self.categories.len(),
            daily_values: self.daily_values.len(),
        }
    }
}

static TABLES: OnceLock<ReferenceTables> = OnceLock::new();

/// Install the process-wide tables. The first install wins; later calls
/// return the tables already in place.
pub fn install(tables: ReferenceTables) -> &'static ReferenceTables {
    let mut pending = Some(tables);
    let installed = TABLES.get_or_init(|| pending.take().unwrap_or_default());
    if pending.is_some() {
        tracing::warn!("Reference tables already installed; keeping the existing tables");
    }
    installed
}

/// Process-wide tables, falling back to the embedded set on first use
pub fn reference_tables() -> &'static ReferenceTables {
    TABLES.get_or_init(ReferenceTables::embedded)
}
