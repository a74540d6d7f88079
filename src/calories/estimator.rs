//! Daily calorie requirement estimator
//!
//! Harris-Benedict (revised) basal metabolic rate scaled by an activity multiplier.
//! Everything here is pure: no I/O, no shared state, safe to call from any thread.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Centimeters per foot
pub const CM_PER_FOOT: f64 = 30.48;

/// Multiplier applied when the activity label is not in the table
pub const DEFAULT_MULTIPLIER: f64 = 1.2;

/// Caller-side bounds used by [`CalorieInputs::validate`]
pub const MIN_WEIGHT_KG: f64 = 1.0;
pub const MIN_HEIGHT_FT: f64 = 1.0;
pub const MIN_AGE_YEARS: i64 = 1;
pub const MAX_AGE_YEARS: i64 = 150;

/// Validation failures for calorie inputs.
///
/// `estimate` never produces these; they come from the opt-in `validate` step.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalorieError {
    #[error("weight must be a finite value of at least 1 kg, got {0}")]
    InvalidWeight(f64),

    #[error("height must be a finite value of at least 1 ft, got {0}")]
    InvalidHeight(f64),

    #[error("age must be between 1 and 150 years, got {0}")]
    InvalidAge(i64),
}

/// Lowercase and trim a free-text label before matching it
pub fn normalize_label(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Biological sex as used by the BMR formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
        }
    }

    /// Only an exact (normalized) "male" or "female" is recognized
    pub fn from_label(label: &str) -> Option<Self> {
        match normalize_label(label).as_str() {
            "male" => Some(Sex::Male),
            "female" => Some(Sex::Female),
            _ => None,
        }
    }

    /// Anything that is not "male" is treated as female.
    pub fn parse(label: &str) -> Self {
        if normalize_label(label) == "male" {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Daily activity level, ordered from least to most active
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ActivityLevel {
    #[default]
    #[serde(rename = "sedentary")]
    Sedentary,
    #[serde(rename = "lightly active")]
    LightlyActive,
    #[serde(rename = "moderately active")]
    ModeratelyActive,
    #[serde(rename = "very active")]
    VeryActive,
    #[serde(rename = "extremely active")]
    ExtremelyActive,
}

impl ActivityLevel {
    /// The closed lookup table, in ascending order
    pub const ALL: [ActivityLevel; 5] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
        ActivityLevel::ExtremelyActive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "sedentary",
            ActivityLevel::LightlyActive => "lightly active",
            ActivityLevel::ModeratelyActive => "moderately active",
            ActivityLevel::VeryActive => "very active",
            ActivityLevel::ExtremelyActive => "extremely active",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Sedentary",
            ActivityLevel::LightlyActive => "Lightly Active",
            ActivityLevel::ModeratelyActive => "Moderately Active",
            ActivityLevel::VeryActive => "Very Active",
            ActivityLevel::ExtremelyActive => "Extremely Active",
        }
    }

    /// Factor applied to BMR to get total daily energy expenditure
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtremelyActive => 1.9,
        }
    }

    /// Match a label against the table after normalization.
    ///
    /// Separators are significant: `"very_active"` does not match.
    pub fn parse(label: &str) -> Option<Self> {
        let normalized = normalize_label(label);
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == normalized)
    }

    /// Unknown labels fall back to [`ActivityLevel::Sedentary`]
    pub fn parse_or_default(label: &str) -> Self {
        Self::parse(label).unwrap_or_default()
    }
}

impl fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// The five physiological inputs to the estimator
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalorieInputs {
    pub weight_kg: f64,
    pub height_ft: f64,
    pub age_years: i64,
    pub sex: Sex,
    pub activity_level: ActivityLevel,
}

/// Intermediate values of one estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CalorieBreakdown {
    pub height_cm: f64,
    pub bmr: f64,
    pub multiplier: f64,
    pub kcal_per_day: f64,
}

impl CalorieInputs {
    pub fn new(
        weight_kg: f64,
        height_ft: f64,
        age_years: i64,
        sex: Sex,
        activity_level: ActivityLevel,
    ) -> Self {
        Self {
            weight_kg,
            height_ft,
            age_years,
            sex,
            activity_level,
        }
    }

    /// Build from free-text labels, applying the lenient sex and activity fallbacks
    pub fn from_labels(
        weight_kg: f64,
        height_ft: f64,
        age_years: i64,
        sex: &str,
        activity_level: &str,
    ) -> Self {
        Self::new(
            weight_kg,
            height_ft,
            age_years,
            Sex::parse(sex),
            ActivityLevel::parse_or_default(activity_level),
        )
    }

    pub fn height_cm(&self) -> f64 {
        self.height_ft * CM_PER_FOOT
    }

    /// Basal metabolic rate in kcal/day
    pub fn bmr(&self) -> f64 {
        let weight = self.weight_kg;
        let height_cm = self.height_cm();
        let age = self.age_years as f64;

        match self.sex {
            Sex::Male => 88.362 + (13.397 * weight) + (4.799 * height_cm) - (5.677 * age),
            Sex::Female => 447.593 + (9.247 * weight) + (3.098 * height_cm) - (4.330 * age),
        }
    }

    /// Estimated daily requirement in kcal. Never clamped.
    pub fn estimate(&self) -> f64 {
        self.bmr() * self.activity_level.multiplier()
    }

    pub fn breakdown(&self) -> CalorieBreakdown {
        let bmr = self.bmr();
        let multiplier = self.activity_level.multiplier();
        CalorieBreakdown {
            height_cm: self.height_cm(),
            bmr,
            multiplier,
            kcal_per_day: bmr * multiplier,
        }
    }

    /// Check the form-level bounds. Separate from `estimate`, which accepts anything.
    pub fn validate(&self) -> Result<(), CalorieError> {
        if !self.weight_kg.is_finite() || self.weight_kg < MIN_WEIGHT_KG {
            return Err(CalorieError::InvalidWeight(self.weight_kg));
        }
        if !self.height_ft.is_finite() || self.height_ft < MIN_HEIGHT_FT {
            return Err(CalorieError::InvalidHeight(self.height_ft));
        }
        if !(MIN_AGE_YEARS..=MAX_AGE_YEARS).contains(&self.age_years) {
            return Err(CalorieError::InvalidAge(self.age_years));
        }
        Ok(())
    }
}

/// Estimate daily calorie needs from raw form values.
///
/// Sex and activity labels are matched case-insensitively. Any sex other than
/// "male" uses the female coefficients and an unknown activity level uses the
/// sedentary multiplier. No validation is performed.
pub fn estimate(
    weight_kg: f64,
    height_ft: f64,
    age_years: i64,
    sex: &str,
    activity_level: &str,
) -> f64 {
    CalorieInputs::from_labels(weight_kg, height_ft, age_years, sex, activity_level).estimate()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_male_sedentary_scenario() {
        let kcal = estimate(70.0, 5.9, 30, "male", "sedentary");
        assert!((kcal - 2062.74).abs() < 0.5);
    }

    #[test]
    fn test_female_very_active_scenario() {
        let kcal = estimate(60.0, 5.5, 25, "female", "very active");
        assert!((kcal - 2438.17).abs() < 0.5);
    }

    #[test]
    fn test_breakdown_matches_estimate() {
        let inputs = CalorieInputs::from_labels(80.0, 6.0, 40, "Male", "Moderately Active");
        let breakdown = inputs.breakdown();
        assert!((breakdown.height_cm - 182.88).abs() < 1e-9);
        assert!((breakdown.bmr - 1810.68312).abs() < 1e-6);
        assert_eq!(breakdown.multiplier, 1.55);
        assert_eq!(breakdown.kcal_per_day, inputs.estimate());
    }

    #[test]
    fn test_deterministic() {
        let a = estimate(72.5, 5.75, 44, "female", "lightly active");
        let b = estimate(72.5, 5.75, 44, "female", "lightly active");
        assert_eq!(a.to_bits(), b.to_bits());
    }

    #[test]
    fn test_struct_and_free_function_agree() {
        let inputs = CalorieInputs::new(60.0, 5.5, 25, Sex::Female, ActivityLevel::VeryActive);
        let free = estimate(60.0, 5.5, 25, "female", "very active");
        assert_eq!(inputs.estimate().to_bits(), free.to_bits());
    }

    #[test]
    fn test_sex_case_insensitive() {
        let upper = estimate(70.0, 5.9, 30, "MALE", "sedentary");
        let lower = estimate(70.0, 5.9, 30, "male", "sedentary");
        let padded = estimate(70.0, 5.9, 30, "  Male ", "sedentary");
        assert_eq!(upper, lower);
        assert_eq!(padded, lower);
    }

    #[test]
    fn test_unknown_sex_uses_female_formula() {
        let other = estimate(70.0, 5.9, 30, "other", "sedentary");
        let female = estimate(70.0, 5.9, 30, "female", "sedentary");
        assert_eq!(other, female);
        assert_eq!(Sex::from_label("other"), None);
        assert_eq!(Sex::from_label(" FEMALE"), Some(Sex::Female));
    }

    #[test]
    fn test_unknown_activity_defaults_to_sedentary() {
        let unknown = estimate(70.0, 5.9, 30, "male", "unknown");
        let sedentary = estimate(70.0, 5.9, 30, "male", "sedentary");
        assert_eq!(unknown, sedentary);
        assert_eq!(
            ActivityLevel::parse_or_default("very_active"),
            ActivityLevel::Sedentary
        );
    }

    #[test]
    fn test_activity_case_insensitive() {
        assert_eq!(
            ActivityLevel::parse("Extremely Active"),
            Some(ActivityLevel::ExtremelyActive)
        );
        assert_eq!(
            ActivityLevel::parse("  LIGHTLY ACTIVE "),
            Some(ActivityLevel::LightlyActive)
        );
        assert_eq!(ActivityLevel::parse(""), None);
    }

    #[test]
    fn test_activity_monotonic() {
        let results: Vec<f64> = ActivityLevel::ALL
            .iter()
            .map(|level| estimate(70.0, 5.9, 30, "male", level.as_str()))
            .collect();
        for pair in results.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn test_multiplier_table() {
        let multipliers: Vec<f64> = ActivityLevel::ALL.iter().map(|l| l.multiplier()).collect();
        assert_eq!(multipliers, vec![1.2, 1.375, 1.55, 1.725, 1.9]);
        assert_eq!(ActivityLevel::default().multiplier(), DEFAULT_MULTIPLIER);
    }

    #[test]
    fn test_out_of_range_inputs_still_compute() {
        // Zero age is outside the form bounds but the formula still applies
        let kcal = estimate(70.0, 5.9, 0, "male", "sedentary");
        assert!((kcal - 2266.9989).abs() < 0.001);
        let negative = estimate(-5.0, 0.0, -3, "female", "sedentary");
        assert!(negative.is_finite());
    }

    #[test]
    fn test_validate_bounds() {
        let ok = CalorieInputs::new(70.0, 5.9, 30, Sex::Male, ActivityLevel::Sedentary);
        assert!(ok.validate().is_ok());

        let light = CalorieInputs { weight_kg: 0.5, ..ok };
        assert_eq!(light.validate(), Err(CalorieError::InvalidWeight(0.5)));

        let short = CalorieInputs { height_ft: f64::NAN, ..ok };
        assert!(matches!(short.validate(), Err(CalorieError::InvalidHeight(_))));

        let old = CalorieInputs { age_years: 151, ..ok };
        assert_eq!(old.validate(), Err(CalorieError::InvalidAge(151)));

        let edge = CalorieInputs { weight_kg: 1.0, height_ft: 1.0, age_years: 150, ..ok };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_activity_serde_labels() {
        let json = serde_json::to_string(&ActivityLevel::ModeratelyActive).unwrap();
        assert_eq!(json, "\"moderately active\"");
        let sex: Sex = serde_json::from_str("\"male\"").unwrap();
        assert_eq!(sex, Sex::Male);
    }
}
