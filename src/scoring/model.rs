use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::scoring::{
    errors::Degradation,
    patterns::{Category, CategoryMatch},
    preprocess::TextStatistics,
};

/// The three headline scores, each in `[0, 100]`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisResult {
    pub sensationalism: f64,
    #[serde(rename = "writingStyle")]
    pub writing_style: f64,
    pub clickbait: f64,
}

impl AnalysisResult {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_zero(&self) -> bool {
        self.sensationalism == 0.0 && self.writing_style == 0.0 && self.clickbait == 0.0
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryMatches {
    pub clickbait: CategoryMatch,
    pub writing_style: CategoryMatch,
    pub sensationalism: CategoryMatch,
}

impl CategoryMatches {
    pub fn get(&self, category: Category) -> CategoryMatch {
        match category {
            Category::Clickbait => self.clickbait,
            Category::WritingStyle => self.writing_style,
            Category::Sensationalism => self.sensationalism,
        }
    }
}

/// Writing-style length and diversity contributions after the Malayalam
/// adjustment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct StyleFactors {
    pub length_factor: f64,
    pub diversity_factor: f64,
}

/// Everything [`crate::scoring::StyleAnalyzer::analyze`] learned about one
/// input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalysisReport {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub statistics: TextStatistics,
    pub style_factors: StyleFactors,
    pub malayalam_ratio: f64,
    pub malayalam_flavored: bool,
    pub language: Option<String>,
    pub matches: CategoryMatches,
    pub truncated: bool,
    pub degradations: Vec<Degradation>,
}

impl AnalysisReport {
    pub fn rejected(degradation: Degradation) -> Self {
        Self {
            degradations: vec![degradation],
            ..Self::default()
        }
    }
}
