use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

use crate::scoring::patterns::Category;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoreError {
    #[error("input too short ({length} chars, minimum {minimum})")]
    InputTooShort { length: usize, minimum: usize },

    #[error("non-finite value {value} in {stage}")]
    NonFinite { stage: &'static str, value: f64 },

    #[error("zero denominator in {0}")]
    ZeroDenominator(&'static str),
}

/// Which scoring step fell back to its neutral default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DegradationKind {
    InvalidInput,
    PatternMatch,
    WritingStyle,
    Clickbait,
    Sensationalism,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Degradation {
    pub kind: DegradationKind,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    pub message: String,
}

impl Degradation {
    pub fn new(kind: DegradationKind, category: Option<Category>, error: &ScoreError) -> Self {
        Self {
            kind,
            category,
            message: error.to_string(),
        }
    }
}
