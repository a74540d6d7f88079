//! Prompt MCP Tools
//!
//! Assemble the food-photo and diagnosis prompts for the client to send to its model.

use serde::Serialize;

use crate::calories::{MacroDistribution, MacroPercentages};
use crate::db::Database;
use crate::prompts::{
    calorie_reminder, CaseReport, CaseReportInput, FoodImage, FOOD_ANALYSIS_PROMPT,
};
use crate::tools::profiles::profile_calories;

#[derive(Debug, Serialize)]
pub struct ImageSummary {
    pub path: String,
    pub mime_type: &'static str,
    pub size_bytes: usize,
}

/// Response for food_analysis_prompt
#[derive(Debug, Serialize)]
pub struct FoodPromptResponse {
    pub prompt: &'static str,
    pub image: Option<ImageSummary>,
    pub calorie_reminder: Option<String>,
    pub macro_distribution: MacroPercentages,
}

/// Response for diagnosis_prompt
#[derive(Debug, Serialize)]
pub struct DiagnosisPromptResponse {
    pub summary: String,
    pub submittable: bool,
    pub prompt: Option<String>,
    pub warning: Option<String>,
}

/// Build the food-photo prompt.
///
/// When `image_path` is given the file must exist and be a jpg/png. When `username`
/// names a saved profile, the reminder line carries that profile's estimate.
pub fn food_analysis_prompt(
    db: &Database,
    image_path: Option<&str>,
    username: Option<&str>,
) -> Result<FoodPromptResponse, String> {
    let image = match image_path {
        Some(path) => {
            let image = FoodImage::from_path(path).map_err(|e| e.to_string())?;
            Some(ImageSummary {
                path: path.to_string(),
                mime_type: image.mime_type(),
                size_bytes: image.size_bytes(),
            })
        }
        None => None,
    };

    let calorie_reminder = match username {
        Some(name) => profile_calories(db, name)?
            .map(|p| calorie_reminder(p.estimate.breakdown.kcal_per_day)),
        None => None,
    };

    Ok(FoodPromptResponse {
        prompt: FOOD_ANALYSIS_PROMPT,
        image,
        calorie_reminder,
        macro_distribution: MacroDistribution::reference().percentages(),
    })
}

/// Build the diagnosis question; withheld when no symptoms were entered
pub fn diagnosis_prompt(input: &CaseReportInput) -> Result<DiagnosisPromptResponse, String> {
    let report = CaseReport::new(input).map_err(|e| e.to_string())?;
    let summary = report.summary();

    match report.ensure_submittable() {
        Ok(()) => Ok(DiagnosisPromptResponse {
            summary,
            submittable: true,
            prompt: Some(report.question_prompt()),
            warning: None,
        }),
        Err(e) => Ok(DiagnosisPromptResponse {
            summary,
            submittable: false,
            prompt: None,
            warning: Some(e.to_string()),
        }),
    }
}
