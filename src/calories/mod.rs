//! Calorie calculation module
//!
//! Daily requirement estimation and the reference macronutrient split.

pub mod estimator;
pub mod macros;

pub use estimator::{
    estimate, normalize_label, ActivityLevel, CalorieBreakdown, CalorieError, CalorieInputs, Sex,
    CM_PER_FOOT, DEFAULT_MULTIPLIER,
};
pub use macros::{MacroDistribution, MacroGrams, MacroPercentages};
