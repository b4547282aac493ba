//! KetoScan MCP Server Implementation
//!
//! Implements the MCP server with all KetoScan tools.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::analysis::KetoAnalyzer;
use crate::config::Thresholds;
use crate::models::{NutritionData, NutritionDataUpdate};
use crate::tables::ReferenceTables;
use crate::tools::labels;
use crate::tools::status::StatusTracker;

/// KetoScan MCP Service
#[derive(Clone)]
pub struct KetoScanService {
    status_tracker: Arc<StatusTracker>,
    tables: &'static ReferenceTables,
    thresholds: Thresholds,
    tool_router: ToolRouter<KetoScanService>,
}

impl KetoScanService {
    pub fn new(tables: &'static ReferenceTables, tables_source: String, thresholds: Thresholds) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(tables_source, tables.counts(), thresholds)),
            tables,
            thresholds,
            tool_router: Self::tool_router(),
        }
    }

    fn analyzer(&self) -> KetoAnalyzer<'static> {
        KetoAnalyzer::new(self.tables).with_thresholds(self.thresholds)
    }
}

fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn to_btree(micros: Option<HashMap<String, f64>>) -> BTreeMap<String, f64> {
    micros.unwrap_or_default().into_iter().collect()
}

// ============================================================================
// Label Parameter Structs
// ============================================================================

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LabelParams {
    /// Product name as printed
    pub product_name: Option<String>,
    /// Serving size text, e.g. "30 g" or "2 tbsp (30 mL)"
    pub serving_size: Option<String>,
    /// Serving weight in grams, if known
    pub serving_weight_g: Option<f64>,
    /// Calories per serving (omit if not printed)
    pub calories: Option<f64>,
    /// Grams per serving
    pub fat: Option<f64>,
    pub sat_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sugar_alcohol: Option<f64>,
    pub added_sugar: Option<f64>,
    /// Milligrams per serving
    pub sodium: Option<f64>,
    /// Glycemic index, only if printed on the pack
    pub gi: Option<f64>,
    /// Ingredient list as printed
    pub ingredients: Option<String>,
    /// Micronutrient name -> %DV
    pub micros: Option<HashMap<String, f64>>,
    /// Front-of-pack claims
    pub claims: Option<Vec<String>>,
}

impl From<LabelParams> for NutritionData {
    fn from(p: LabelParams) -> Self {
        NutritionData {
            product_name: p.product_name, serving_size: p.serving_size,
            serving_weight_g: p.serving_weight_g, calories: p.calories,
            fat: p.fat, sat_fat: p.sat_fat, trans_fat: p.trans_fat, protein: p.protein,
            carbs: p.carbs, fiber: p.fiber, sugar: p.sugar, sugar_alcohol: p.sugar_alcohol,
            added_sugar: p.added_sugar, sodium: p.sodium, gi: p.gi, ingredients: p.ingredients,
            micros: to_btree(p.micros),
            claims: p.claims.unwrap_or_default(),
        }
        .with_derived_serving_weight()
    }
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct CorrectionParams {
    pub product_name: Option<String>,
    /// New serving size text; clears the derived weight unless serving_weight_g is also given
    pub serving_size: Option<String>,
    pub serving_weight_g: Option<f64>,
    pub calories: Option<f64>,
    pub fat: Option<f64>,
    pub sat_fat: Option<f64>,
    pub trans_fat: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fiber: Option<f64>,
    pub sugar: Option<f64>,
    pub sugar_alcohol: Option<f64>,
    pub added_sugar: Option<f64>,
    pub sodium: Option<f64>,
    pub gi: Option<f64>,
    pub ingredients: Option<String>,
    /// Replaces all micronutrients when given
    pub micros: Option<HashMap<String, f64>>,
    /// Replaces all claims when given
    pub claims: Option<Vec<String>>,
}

impl From<CorrectionParams> for NutritionDataUpdate {
    fn from(p: CorrectionParams) -> Self {
        NutritionDataUpdate {
            product_name: p.product_name, serving_size: p.serving_size,
            serving_weight_g: p.serving_weight_g, calories: p.calories,
            fat: p.fat, sat_fat: p.sat_fat, trans_fat: p.trans_fat, protein: p.protein,
            carbs: p.carbs, fiber: p.fiber, sugar: p.sugar, sugar_alcohol: p.sugar_alcohol,
            added_sugar: p.added_sugar, sodium: p.sodium, gi: p.gi, ingredients: p.ingredients,
            micros: p.micros.map(|m| m.into_iter().collect()),
            claims: p.claims,
        }
    }
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ReanalyzeParams {
    /// The label as originally scanned
    pub label: LabelParams,
    /// Only the fields that were misread
    pub corrections: CorrectionParams,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ParseServingSizeParams {
    /// Serving size text, e.g. "1 cup (240g)"
    pub serving_size: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CategorizeIngredientsParams {
    /// Ingredient list as printed
    pub ingredients: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveGiParams {
    /// Glycemic index printed on the pack
    pub gi: Option<f64>,
    pub product_name: Option<String>,
    pub ingredients: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ConvertMicrosParams {
    /// Micronutrient name -> %DV
    pub micros: HashMap<String, f64>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl KetoScanService {
    // --- Status ---

    #[tool(description = "Get the current status of the KetoScan service including build info, reference tables, thresholds and process information")]
    async fn ketoscan_status(&self) -> Result<CallToolResult, McpError> {
        json_result(&self.status_tracker.get_status())
    }

    #[tool(description = "Get instructions for reading nutrition labels into KetoScan and interpreting the result. Call this before the first analysis in a session.")]
    async fn analysis_instructions(&self) -> Result<CallToolResult, McpError> {
        use crate::tools::status::ANALYSIS_INSTRUCTIONS;
        Ok(CallToolResult::success(vec![Content::text(ANALYSIS_INSTRUCTIONS)]))
    }

    // --- Analysis ---

    #[tool(description = "Analyse a nutrition label (per-serving values) into a per-100g profile, keto verdict, keto score and warnings. Returns status 'unavailable' when the serving weight cannot be determined.")]
    async fn analyze_nutrition_label(&self, Parameters(p): Parameters<LabelParams>) -> Result<CallToolResult, McpError> {
        let data = NutritionData::from(p);
        json_result(&labels::analyze_label(&self.analyzer(), &data))
    }

    #[tool(description = "Apply corrections to a scanned label and analyse it again. Use when a value was misread or the serving weight was missing.")]
    async fn reanalyze_with_corrections(&self, Parameters(p): Parameters<ReanalyzeParams>) -> Result<CallToolResult, McpError> {
        let data = NutritionData::from(p.label);
        let corrections = NutritionDataUpdate::from(p.corrections);
        json_result(&labels::reanalyze_with_corrections(&self.analyzer(), &data, &corrections))
    }

    // --- Components ---

    #[tool(description = "Parse a serving size string into grams (mL are treated as grams)")]
    async fn parse_serving_size(&self, Parameters(p): Parameters<ParseServingSizeParams>) -> Result<CallToolResult, McpError> {
        json_result(&labels::parse_serving_size(&p.serving_size))
    }

    #[tool(description = "Classify an ingredient list into a food category with a GI estimate and confidence")]
    async fn categorize_ingredients(&self, Parameters(p): Parameters<CategorizeIngredientsParams>) -> Result<CallToolResult, McpError> {
        json_result(&labels::categorize_ingredients(self.tables, p.ingredients.as_deref()))
    }

    #[tool(description = "Resolve a glycemic index from a printed value, the product name, or the ingredient category")]
    async fn resolve_glycemic_index(&self, Parameters(p): Parameters<ResolveGiParams>) -> Result<CallToolResult, McpError> {
        let result = labels::resolve_glycemic_index(
            self.tables,
            p.gi,
            p.product_name.as_deref(),
            p.ingredients.as_deref(),
        );
        json_result(&result)
    }

    #[tool(description = "Convert micronutrient %DV readings to milligrams using FDA daily values")]
    async fn convert_micronutrients(&self, Parameters(p): Parameters<ConvertMicrosParams>) -> Result<CallToolResult, McpError> {
        let micros = to_btree(Some(p.micros));
        json_result(&labels::convert_micronutrients(self.tables, &micros))
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for KetoScanService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "ketoscan".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("KetoScan".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "KetoScan - keto analysis of nutrition labels. \
                 IMPORTANT: Call analysis_instructions before the first analysis. \
                 Analysis: analyze_nutrition_label, reanalyze_with_corrections. \
                 Components: parse_serving_size, categorize_ingredients, resolve_glycemic_index, \
                 convert_micronutrients. Status: ketoscan_status."
                    .into(),
            ),
        }
    }
}
