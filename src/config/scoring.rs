use crate::scoring::normalize::Sigmoid;

/// Calibration constants for the scoring pipeline. These were hand-tuned and
/// are not load-bearing; the defaults are the reference set the tests pin.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoringConfig {
    /// Inputs shorter than this (in chars, after trimming) score all zeros.
    pub min_length: usize,
    /// Inputs are truncated to this many chars before scoring.
    pub max_length: usize,
    /// Share of Malayalam chars above which text counts as Malayalam-flavored.
    pub malayalam_threshold: f64,
    pub sigmoid: Sigmoid,
    pub clickbait_max_observed_malayalam: f64,
    pub clickbait_max_observed_other: f64,
    pub sensationalism_max_observed: f64,
    /// Texts longer than this many chars get their clickbait score damped.
    pub long_text_chars: usize,
    pub long_text_factor: f64,
    pub malayalam_length_multiplier: f64,
    pub malayalam_diversity_multiplier: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 3000,
            malayalam_threshold: 0.3,
            sigmoid: Sigmoid::default(),
            clickbait_max_observed_malayalam: 500.0,
            clickbait_max_observed_other: 400.0,
            sensationalism_max_observed: 400.0,
            long_text_chars: 1000,
            long_text_factor: 0.8,
            malayalam_length_multiplier: 0.8,
            malayalam_diversity_multiplier: 1.2,
        }
    }
}

impl ScoringConfig {
    pub fn clickbait_max_observed(&self, malayalam_flavored: bool) -> f64 {
        if malayalam_flavored {
            self.clickbait_max_observed_malayalam
        } else {
            self.clickbait_max_observed_other
        }
    }
}
