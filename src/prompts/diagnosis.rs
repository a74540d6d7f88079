//! Diagnosis assistant case report
//!
//! Collects the patient details entered on the diagnosis form and renders both the
//! on-screen summary and the question sent to the model.

use serde::{Deserialize, Serialize};

use super::PromptError;
use crate::calories::Sex;

/// Placeholder for free-text fields left blank
pub const NONE_LABEL: &str = "None";

/// Free-text fields are capped at this many characters
pub const MAX_FIELD_CHARS: usize = 250;

pub const MAX_PATIENT_AGE: u32 = 99;

const DEFAULT_LANGUAGE: &str = "English";

const DIAGNOSIS_INSTRUCTION: &str = "Suspect and diagnose the disease the person is suffering from, \
     recommend suggestions to confirm the diagnosis, and describe treatments for the problem.";

/// Raw form values
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CaseReportInput {
    pub sex: String,
    pub age: u32,
    #[serde(default)]
    pub pregnant: bool,
    #[serde(default)]
    pub history: String,
    #[serde(default)]
    pub symptoms: String,
    #[serde(default)]
    pub exam: String,
    #[serde(default)]
    pub lab_results: String,
    #[serde(default)]
    pub language: Option<String>,
}

/// A validated case report with blanks already replaced by [`NONE_LABEL`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseReport {
    pub sex: Sex,
    pub age: u32,
    pub pregnant: bool,
    pub history: String,
    pub symptoms: String,
    pub exam: String,
    pub lab_results: String,
    pub language: String,
}

fn field_or_none(field: &'static str, value: &str) -> Result<String, PromptError> {
    let trimmed = value.trim();
    if trimmed.chars().count() > MAX_FIELD_CHARS {
        return Err(PromptError::FieldTooLong {
            field,
            max: MAX_FIELD_CHARS,
        });
    }
    if trimmed.is_empty() {
        Ok(NONE_LABEL.to_string())
    } else {
        Ok(trimmed.to_string())
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl CaseReport {
    pub fn new(input: &CaseReportInput) -> Result<Self, PromptError> {
        if input.age > MAX_PATIENT_AGE {
            return Err(PromptError::InvalidAge {
                age: input.age,
                max: MAX_PATIENT_AGE,
            });
        }

        let sex = Sex::parse(&input.sex);
        let language = input
            .language
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_string();

        Ok(Self {
            sex,
            age: input.age,
            // The pregnancy option is disabled for male patients
            pregnant: input.pregnant && sex == Sex::Female,
            history: field_or_none("history", &input.history)?,
            symptoms: field_or_none("symptoms", &input.symptoms)?,
            exam: field_or_none("exam", &input.exam)?,
            lab_results: field_or_none("lab_results", &input.lab_results)?,
            language,
        })
    }

    pub fn has_symptoms(&self) -> bool {
        self.symptoms != NONE_LABEL
    }

    /// A diagnosis cannot be requested without symptoms
    pub fn ensure_submittable(&self) -> Result<(), PromptError> {
        if self.has_symptoms() {
            Ok(())
        } else {
            Err(PromptError::MissingSymptoms)
        }
    }

    fn sex_label(&self) -> &'static str {
        match self.sex {
            Sex::Male => "Male",
            Sex::Female => "Female",
        }
    }

    /// Patient summary shown before submission
    pub fn summary(&self) -> String {
        format!(
            "Patient: {}, {} years old\n\
             Pregnancy: {}\n\
             Medical history: {}\n\
             Symptoms: {}\n\
             Examination findings: {}\n\
             Laboratory results: {}",
            self.sex_label(),
            self.age,
            yes_no(self.pregnant),
            self.history,
            self.symptoms,
            self.exam,
            self.lab_results,
        )
    }

    /// Full question for the model
    pub fn question_prompt(&self) -> String {
        format!(
            "Patient: {}, {} years old. Pregnant: {}. Medical history: {}. Symptoms: {}. \
             Examination findings: {}. Laboratory results: {}. \
             Answer as a medical diagnostic assistant, in {}. {}",
            self.sex_label(),
            self.age,
            yes_no(self.pregnant),
            self.history,
            self.symptoms,
            self.exam,
            self.lab_results,
            self.language,
            DIAGNOSIS_INSTRUCTION,
        )
    }
}
