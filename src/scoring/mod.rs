pub mod cache;
pub mod errors;
pub mod language;
pub mod model;
pub mod normalize;
pub mod patterns;
pub mod preprocess;

#[cfg(test)]
mod tests;

pub use errors::{Degradation, DegradationKind, ScoreError};
pub use model::{AnalysisReport, AnalysisResult, CategoryMatches, StyleFactors};
pub use patterns::{BANK_VERSION, Category, CategoryMatch, PatternBank};
pub use preprocess::{Preprocessor, TextStatistics};

use std::panic::{self, AssertUnwindSafe};
use tracing::{debug, error, instrument, warn};

use crate::config::ScoringConfig;

/// Neutral fallbacks used when a scoring step fails.
const NEUTRAL_WRITING_STYLE: f64 = 50.0;
const NEUTRAL_CLICKBAIT: f64 = 0.0;
const NEUTRAL_SENSATIONALISM: f64 = 0.0;

pub const DEFAULT_CACHE_CAPACITY: usize = 1024;

/// Seam between the HTTP layer and the scoring engine.
#[cfg_attr(test, mockall::automock)]
pub trait TextAnalyzer {
    /// Score `text`. Never fails; bad input or internal errors yield zeros or
    /// neutral values.
    fn analyze_text(&self, text: &str) -> AnalysisResult;

    /// Same scores plus the intermediate statistics and any degradations.
    fn analyze(&self, text: &str) -> AnalysisReport;
}

/// Malayalam-aware clickbait, sensationalism and writing-style scorer.
///
/// Build one per process and share it; the pattern bank is immutable and the
/// preprocessing cache is safe for concurrent use.
pub struct StyleAnalyzer {
    bank: PatternBank,
    preprocessor: Preprocessor,
    config: ScoringConfig,
}

impl Default for StyleAnalyzer {
    fn default() -> Self {
        Self::new(ScoringConfig::default(), DEFAULT_CACHE_CAPACITY)
    }
}

impl StyleAnalyzer {
    pub fn new(config: ScoringConfig, cache_capacity: usize) -> Self {
        Self::with_bank(PatternBank::new(), config, cache_capacity)
    }

    pub fn with_bank(bank: PatternBank, config: ScoringConfig, cache_capacity: usize) -> Self {
        Self {
            bank,
            preprocessor: Preprocessor::new(cache_capacity),
            config,
        }
    }

    pub fn bank(&self) -> &PatternBank {
        &self.bank
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    pub fn style_factors(&self, stats: &TextStatistics, malayalam_flavored: bool) -> StyleFactors {
        let mut length_factor = (stats.average_sentence_length * 5.0).min(100.0);
        let mut diversity_factor = (stats.lexical_diversity * 200.0).min(100.0);
        if malayalam_flavored {
            length_factor *= self.config.malayalam_length_multiplier;
            diversity_factor *= self.config.malayalam_diversity_multiplier;
        }
        StyleFactors {
            length_factor,
            diversity_factor,
        }
    }

    fn writing_style(&self, style_score: f64, factors: StyleFactors) -> Result<f64, ScoreError> {
        let combined =
            style_score * 0.5 + factors.length_factor * 0.25 + factors.diversity_factor * 0.25;
        self.config.sigmoid.apply(combined)
    }

    fn clickbait(
        &self,
        rule_score: f64,
        text_chars: usize,
        malayalam_flavored: bool,
    ) -> Result<f64, ScoreError> {
        let max_observed = self.config.clickbait_max_observed(malayalam_flavored);
        if max_observed <= 0.0 {
            return Err(ScoreError::ZeroDenominator("clickbait max observed"));
        }
        let length_factor = if text_chars > self.config.long_text_chars {
            self.config.long_text_factor
        } else {
            1.0
        };

        let raw = (rule_score / max_observed) * 100.0 * length_factor;
        self.config.sigmoid.apply(raw)
    }

    fn sensationalism(
        &self,
        rule_score: f64,
        clickbait: f64,
        writing_style: f64,
        malayalam_flavored: bool,
    ) -> Result<f64, ScoreError> {
        let raw = if malayalam_flavored {
            let max_observed = self.config.sensationalism_max_observed;
            if max_observed <= 0.0 {
                return Err(ScoreError::ZeroDenominator("sensationalism max observed"));
            }
            (rule_score / max_observed) * 100.0 * 0.6 + clickbait * 0.4
        } else {
            clickbait * 0.7 + (100.0 - writing_style) * 0.3
        };
        self.config.sigmoid.apply(raw)
    }

    fn match_checked(
        &self,
        text: &str,
        category: Category,
        degradations: &mut Vec<Degradation>,
    ) -> CategoryMatch {
        accept_match(category, self.bank.match_category(text, category), degradations)
    }

    #[instrument(skip_all, fields(bytes = text.len()))]
    fn run(&self, text: &str, detect_language: bool) -> AnalysisReport {
        let trimmed_chars = text.trim().chars().count();
        if trimmed_chars < self.config.min_length {
            let err = ScoreError::InputTooShort {
                length: trimmed_chars,
                minimum: self.config.min_length,
            };
            debug!(error = %err, "rejecting input");
            return AnalysisReport::rejected(Degradation::new(
                DegradationKind::InvalidInput,
                None,
                &err,
            ));
        }

        let (text, truncated) = truncate_chars(text, self.config.max_length);
        let text_chars = text.chars().count();

        let malayalam_ratio = match language::malayalam_ratio(text) {
            Ok(ratio) => ratio,
            Err(err) => {
                warn!(error = %err, "could not measure script mix");
                return AnalysisReport::rejected(Degradation::new(
                    DegradationKind::InvalidInput,
                    None,
                    &err,
                ));
            }
        };
        let malayalam_flavored = malayalam_ratio > self.config.malayalam_threshold;

        let processed = self.preprocessor.preprocess(text);
        let statistics = processed.statistics();

        let mut degradations = Vec::new();
        let matches = CategoryMatches {
            clickbait: self.match_checked(text, Category::Clickbait, &mut degradations),
            writing_style: self.match_checked(text, Category::WritingStyle, &mut degradations),
            sensationalism: self.match_checked(text, Category::Sensationalism, &mut degradations),
        };

        let style_factors = self.style_factors(&statistics, malayalam_flavored);

        let writing_style = self
            .writing_style(matches.writing_style.score, style_factors)
            .unwrap_or_else(|err| {
                degrade(
                    &mut degradations,
                    DegradationKind::WritingStyle,
                    err,
                    NEUTRAL_WRITING_STYLE,
                )
            });

        let clickbait = self
            .clickbait(matches.clickbait.score, text_chars, malayalam_flavored)
            .unwrap_or_else(|err| {
                degrade(
                    &mut degradations,
                    DegradationKind::Clickbait,
                    err,
                    NEUTRAL_CLICKBAIT,
                )
            });

        let sensationalism = self
            .sensationalism(
                matches.sensationalism.score,
                clickbait,
                writing_style,
                malayalam_flavored,
            )
            .unwrap_or_else(|err| {
                degrade(
                    &mut degradations,
                    DegradationKind::Sensationalism,
                    err,
                    NEUTRAL_SENSATIONALISM,
                )
            });

        debug!(
            malayalam_ratio,
            clickbait, writing_style, sensationalism, "text analyzed"
        );

        AnalysisReport {
            result: AnalysisResult {
                sensationalism,
                writing_style,
                clickbait,
            },
            statistics,
            style_factors,
            malayalam_ratio,
            malayalam_flavored,
            language: if detect_language {
                language::detect_language(text)
            } else {
                None
            },
            matches,
            truncated,
            degradations,
        }
    }
}

impl StyleAnalyzer {
    fn run_guarded(&self, text: &str, detect_language: bool) -> AnalysisReport {
        match panic::catch_unwind(AssertUnwindSafe(|| self.run(text, detect_language))) {
            Ok(report) => report,
            Err(_) => {
                error!(bytes = text.len(), "text analysis panicked; returning zero scores");
                AnalysisReport::default()
            }
        }
    }
}

impl TextAnalyzer for StyleAnalyzer {
    fn analyze_text(&self, text: &str) -> AnalysisResult {
        self.run_guarded(text, false).result
    }

    fn analyze(&self, text: &str) -> AnalysisReport {
        self.run_guarded(text, true)
    }
}

/// Pass `result` through unless its score is non-finite. With integer weights
/// this only trips if the bank arithmetic changes.
fn accept_match(
    category: Category,
    result: CategoryMatch,
    degradations: &mut Vec<Degradation>,
) -> CategoryMatch {
    if result.score.is_finite() {
        return result;
    }

    let err = ScoreError::NonFinite {
        stage: "pattern match",
        value: result.score,
    };
    warn!(category = category.as_str(), error = %err, "pattern matching degraded");
    degradations.push(Degradation::new(
        DegradationKind::PatternMatch,
        Some(category),
        &err,
    ));
    CategoryMatch::default()
}

fn degrade(
    degradations: &mut Vec<Degradation>,
    kind: DegradationKind,
    err: ScoreError,
    fallback: f64,
) -> f64 {
    warn!(kind = ?kind, error = %err, fallback, "scoring step degraded to neutral default");
    degradations.push(Degradation::new(kind, None, &err));
    fallback
}

/// First `max_chars` chars of `text`, and whether anything was cut.
pub fn truncate_chars(text: &str, max_chars: usize) -> (&str, bool) {
    match text.char_indices().nth(max_chars) {
        Some((byte_index, _)) => (&text[..byte_index], true),
        None => (text, false),
    }
}
