//! Prompt assembly
//!
//! Builds the text handed to the generative model for food photos and the
//! diagnosis assistant. Calling the model is the client's job.

pub mod diagnosis;
pub mod food;

use thiserror::Error;

pub use diagnosis::{CaseReport, CaseReportInput, MAX_FIELD_CHARS, MAX_PATIENT_AGE, NONE_LABEL};
pub use food::{calorie_reminder, FoodImage, ImageType, FOOD_ANALYSIS_PROMPT};

/// Errors raised while assembling a prompt
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("No file uploaded")]
    MissingImage,

    #[error("Unsupported image type '{0}', expected jpg, jpeg or png")]
    UnsupportedImageType(String),

    #[error("Please describe at least one symptom before requesting a diagnosis")]
    MissingSymptoms,

    #[error("{field} is limited to {max} characters")]
    FieldTooLong { field: &'static str, max: usize },

    #[error("Patient age must be at most {max}, got {age}")]
    InvalidAge { age: u32, max: u32 },

    #[error("Failed to read image: {0}")]
    Io(#[from] std::io::Error),
}
