//! Health Tracker MCP Server Implementation
//!
//! Exposes calorie estimation, profile storage and prompt assembly as MCP tools.

use std::path::PathBuf;
use std::sync::Arc;

use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{schemars, tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use serde::{Deserialize, Serialize};

use crate::db::Database;
use crate::models::UserProfileSave;
use crate::prompts::CaseReportInput;
use crate::tools::calories;
use crate::tools::profiles;
use crate::tools::prompts;
use crate::tools::status::StatusTracker;

/// Health Tracker MCP Service
#[derive(Clone)]
pub struct HealthTrackService {
    status_tracker: Arc<StatusTracker>,
    database: Database,
    tool_router: ToolRouter<HealthTrackService>,
}

impl HealthTrackService {
    pub fn new(database_path: PathBuf, database: Database) -> Self {
        Self {
            status_tracker: Arc::new(StatusTracker::new(database_path)),
            database,
            tool_router: Self::tool_router(),
        }
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(format!("Serialization error: {}", e), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

// ============================================================================
// Calorie Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct CalculateCaloriesParams {
    /// Body weight in kilograms
    pub weight_kg: f64,
    /// Height in feet (e.g. 5.9)
    pub height_ft: f64,
    /// Age in years
    pub age: i64,
    /// "male" or "female" (case-insensitive; anything else uses the female formula)
    pub sex: String,
    /// sedentary, lightly active, moderately active, very active or extremely active
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
}

fn default_activity_level() -> String { "sedentary".to_string() }

// ============================================================================
// Profile Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SaveProfileParams {
    pub username: String,
    /// Weight in kilograms (at least 1.0)
    pub weight_kg: f64,
    /// Height in feet (at least 1.0)
    pub height_ft: f64,
    /// Age in years (1-150)
    pub age: i64,
    /// "Male" or "Female"
    pub sex: String,
    #[serde(default = "default_activity_level")]
    pub activity_level: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct UsernameParams {
    pub username: String,
}

// ============================================================================
// Prompt Parameter Structs
// ============================================================================

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct FoodAnalysisPromptParams {
    /// Path to a jpg/jpeg/png food photo to validate (optional)
    pub image_path: Option<String>,
    /// Saved profile whose calorie estimate goes in the reminder line (optional)
    pub username: Option<String>,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DiagnosisPromptParams {
    /// "Male" or "Female"
    pub sex: String,
    /// Age in years (0-99)
    pub age: u32,
    #[serde(default)]
    pub pregnant: bool,
    /// Medical history (max 250 characters)
    #[serde(default)]
    pub history: String,
    /// Symptoms (required to build the prompt, max 250 characters)
    #[serde(default)]
    pub symptoms: String,
    /// Observations at examination (max 250 characters)
    #[serde(default)]
    pub exam: String,
    /// Laboratory test results (max 250 characters)
    #[serde(default)]
    pub lab_results: String,
    /// Answer language (default English)
    pub language: Option<String>,
}

// ============================================================================
// Tool Implementations
// ============================================================================

#[tool_router]
impl HealthTrackService {
    // --- Status ---

    #[tool(description = "Get the current status of the service including build info, database status, and process information")]
    fn healthtrack_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.status_tracker.get_status(&self.database);
        to_json(&status)
    }

    // --- Calories ---

    #[tool(description = "Estimate daily calorie needs (Harris-Benedict) from weight (kg), height (ft), age, sex and activity level")]
    fn calculate_calories(&self, Parameters(p): Parameters<CalculateCaloriesParams>) -> Result<CallToolResult, McpError> {
        let result = calories::calculate_calories(p.weight_kg, p.height_ft, p.age, &p.sex, &p.activity_level);
        to_json(&result)
    }

    #[tool(description = "List the recognized activity levels and their multipliers")]
    fn activity_levels(&self) -> Result<CallToolResult, McpError> {
        to_json(&calories::activity_levels())
    }

    // --- Profiles ---

    #[tool(description = "Save or replace a user profile (weight, height, age, sex, activity level). Stores the computed daily calorie goal.")]
    fn save_profile(&self, Parameters(p): Parameters<SaveProfileParams>) -> Result<CallToolResult, McpError> {
        let data = UserProfileSave {
            username: p.username,
            weight_kg: p.weight_kg,
            height_ft: p.height_ft,
            age: p.age,
            sex: p.sex,
            activity_level: p.activity_level,
        };
        let result = profiles::save_profile(&self.database, data)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Get a saved user profile by username")]
    fn get_profile(&self, Parameters(p): Parameters<UsernameParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::get_profile(&self.database, &p.username)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(profile) => to_json(&profile),
            None => to_json(&serde_json::json!({ "error": "Profile not found", "username": p.username })),
        }
    }

    #[tool(description = "List all saved user profiles")]
    fn list_profiles(&self) -> Result<CallToolResult, McpError> {
        let result = profiles::list_profiles(&self.database)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Delete a saved user profile")]
    fn delete_profile(&self, Parameters(p): Parameters<UsernameParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::delete_profile(&self.database, &p.username)
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Estimate daily calorie needs for a saved profile")]
    fn profile_calories(&self, Parameters(p): Parameters<UsernameParams>) -> Result<CallToolResult, McpError> {
        let result = profiles::profile_calories(&self.database, &p.username)
            .map_err(|e| McpError::internal_error(e, None))?;
        match result {
            Some(estimate) => to_json(&estimate),
            None => to_json(&serde_json::json!({ "error": "Profile not found", "username": p.username })),
        }
    }

    // --- Prompts ---

    #[tool(description = "Get the nutritionist prompt to send with a food photo, optionally validating the image and adding the user's calorie reminder")]
    fn food_analysis_prompt(&self, Parameters(p): Parameters<FoodAnalysisPromptParams>) -> Result<CallToolResult, McpError> {
        let result = prompts::food_analysis_prompt(&self.database, p.image_path.as_deref(), p.username.as_deref())
            .map_err(|e| McpError::internal_error(e, None))?;
        to_json(&result)
    }

    #[tool(description = "Build the patient summary and diagnosis question from a case report. Symptoms are required.")]
    fn diagnosis_prompt(&self, Parameters(p): Parameters<DiagnosisPromptParams>) -> Result<CallToolResult, McpError> {
        let input = CaseReportInput {
            sex: p.sex,
            age: p.age,
            pregnant: p.pregnant,
            history: p.history,
            symptoms: p.symptoms,
            exam: p.exam,
            lab_results: p.lab_results,
            language: p.language,
        };
        let result = prompts::diagnosis_prompt(&input)
            .map_err(|e| McpError::invalid_params(e, None))?;
        to_json(&result)
    }
}

// ============================================================================
// Server Handler
// ============================================================================

#[tool_handler]
impl ServerHandler for HealthTrackService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::LATEST,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "healthtrack".into(),
                version: crate::build_info::VERSION.into(),
                title: Some("Health Tracker".into()),
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Health Tracker - daily calorie estimation and health intake prompts. \
                 Calories: calculate_calories, activity_levels. \
                 Profiles: save/get/list/delete_profile, profile_calories. \
                 Prompts: food_analysis_prompt (send with the food photo to your vision model), \
                 diagnosis_prompt (requires symptoms). \
                 Status: healthtrack_status."
                    .into(),
            ),
        }
    }
}
