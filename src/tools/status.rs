//! KetoScan Status Tool
//!
//! Provides runtime status information about the KetoScan service.

use serde::Serialize;
use std::time::Instant;
use sysinfo::{Pid, ProcessesToUpdate, System};

use crate::build_info::BuildInfo;
use crate::config::Thresholds;
use crate::tables::TableCounts;

/// Label analysis instructions for AI assistants
pub const ANALYSIS_INSTRUCTIONS: &str = r#"
# KetoScan Label Analysis Instructions

KetoScan turns the numbers on a nutrition label into a per-100 g profile, a
keto verdict and a 0-100 keto score.

## Reading the Label

Pass values exactly as printed, **per serving**:

| Field | Unit | Notes |
|-------|------|-------|
| productName | text | Used for GI and sugar-alcohol matching |
| servingSize | text | e.g. "30 g", "2 tbsp (30 mL)", "1 bar (45 g)" |
| calories | kcal | Omit if not printed |
| fat, satFat, transFat, protein, carbs, fiber, sugar | g | |
| sugarAlcohol, addedSugar | g | |
| sodium | mg | |
| gi | 0-100 | Only if printed on the pack |
| ingredients | text | Comma separated, as printed |
| micros | %DV | e.g. {"Calcium": 10, "Vitamin D": 50} |

**The serving size must contain a weight.** Grams are used directly. Milliliters
are treated as grams (1 g per mL). Without either, analysis is unavailable:
ask the user for the serving weight and call `reanalyze_with_corrections`.

## Reading the Result

- `verdict.ketoOk` requires BOTH `passesNet` (net carbs < 5 g per 100 g)
  and `passesR` (fat-dominance ratio R >= 1)
- `ketoScore` starts at 100 and loses points for net carbs, low R, a high share
  of carb calories, high glycemic load and added sugar
- `giConfidence` is `direct`, `table` or `heuristic-<confidence>`
- `warnings` lists added sugar, saturated fat ratio, sodium and label
  inconsistencies (printed calories disagree with the macros)

## Correcting a Scan

Use `reanalyze_with_corrections` with the original label and only the fields
that were misread.
"#;

/// KetoScan status response
#[derive(Debug, Clone, Serialize)]
pub struct KetoScanStatus {
    pub version: &'static str,
    pub build_timestamp: &'static str,
    pub embedded_tables_digest: &'static str,
    pub started_at: String,
    pub uptime_seconds: u64,
    pub process_id: u32,
    pub memory_usage_bytes: u64,
    pub tables_source: String,
    pub table_counts: TableCounts,
    pub thresholds: Thresholds,
}

/// Tracks service start time and loaded configuration
pub struct StatusTracker {
    start_time: Instant,
    started_at: chrono::DateTime<chrono::Utc>,
    tables_source: String,
    table_counts: TableCounts,
    thresholds: Thresholds,
}

impl StatusTracker {
    pub fn new(tables_source: String, table_counts: TableCounts, thresholds: Thresholds) -> Self {
        Self {
            start_time: Instant::now(),
            started_at: chrono::Utc::now(),
            tables_source,
            table_counts,
            thresholds,
        }
    }

    /// Get the current status
    pub fn get_status(&self) -> KetoScanStatus {
        let build_info = BuildInfo::current();

        let pid = std::process::id();
        let mut sys = System::new();
        sys.refresh_processes(ProcessesToUpdate::Some(&[Pid::from_u32(pid)]));

        let memory_usage_bytes = sys
            .process(Pid::from_u32(pid))
            .map(|p| p.memory())
            .unwrap_or(0);

        KetoScanStatus {
            version: build_info.version,
            build_timestamp: build_info.build_timestamp,
            embedded_tables_digest: build_info.embedded_tables_digest,
            started_at: self.started_at.to_rfc3339(),
            uptime_seconds: self.start_time.elapsed().as_secs(),
            process_id: pid,
            memory_usage_bytes,
            tables_source: self.tables_source.clone(),
            table_counts: self.table_counts,
            thresholds: self.thresholds,
        }
    }
}
