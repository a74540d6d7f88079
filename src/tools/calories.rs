//! Calorie MCP Tools
//!
//! Stateless estimation tools.

use serde::Serialize;

use crate::calories::{
    ActivityLevel, CalorieBreakdown, CalorieInputs, MacroDistribution, MacroGrams, Sex,
};
use crate::prompts::calorie_reminder;

/// Response for calculate_calories and profile_calories
#[derive(Debug, Serialize)]
pub struct CalorieEstimateResponse {
    pub inputs: CalorieInputs,
    pub breakdown: CalorieBreakdown,
    /// Rounded kcal/day
    pub daily_calories: i64,
    pub macro_grams: MacroGrams,
    pub reminder: String,
    /// Labels that did not match and were replaced by a fallback
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ActivityLevelInfo {
    pub label: &'static str,
    pub display_name: &'static str,
    pub multiplier: f64,
}

/// Describe how free-text labels were interpreted
fn label_warnings(sex: &str, activity_level: &str) -> Vec<String> {
    let mut warnings = Vec::new();

    if Sex::from_label(sex).is_none() {
        tracing::warn!("Unrecognized sex '{}', using female coefficients", sex);
        warnings.push(format!(
            "Unrecognized sex '{}'; female coefficients were used",
            sex
        ));
    }
    if ActivityLevel::parse(activity_level).is_none() {
        tracing::warn!(
            "Unrecognized activity level '{}', using sedentary multiplier",
            activity_level
        );
        warnings.push(format!(
            "Unrecognized activity level '{}'; sedentary multiplier ({}) was used",
            activity_level,
            ActivityLevel::Sedentary.multiplier()
        ));
    }

    warnings
}

fn build_estimate(inputs: CalorieInputs, warnings: Vec<String>) -> CalorieEstimateResponse {
    let breakdown = inputs.breakdown();
    tracing::debug!(
        "Estimated {:.2} kcal/day (bmr {:.2} x {})",
        breakdown.kcal_per_day,
        breakdown.bmr,
        breakdown.multiplier
    );

    CalorieEstimateResponse {
        inputs,
        breakdown,
        daily_calories: breakdown.kcal_per_day.round() as i64,
        macro_grams: MacroDistribution::reference().grams_for(breakdown.kcal_per_day),
        reminder: calorie_reminder(breakdown.kcal_per_day),
        warnings,
    }
}

/// Estimate daily calories from raw labels, without validation
pub fn calculate_calories(
    weight_kg: f64,
    height_ft: f64,
    age: i64,
    sex: &str,
    activity_level: &str,
) -> CalorieEstimateResponse {
    let warnings = label_warnings(sex, activity_level);
    let inputs = CalorieInputs::from_labels(weight_kg, height_ft, age, sex, activity_level);
    build_estimate(inputs, warnings)
}

pub fn activity_levels() -> Vec<ActivityLevelInfo> {
    ActivityLevel::ALL
        .iter()
        .map(|level| ActivityLevelInfo {
            label: level.as_str(),
            display_name: level.display_name(),
            multiplier: level.multiplier(),
        })
        .collect()
}
