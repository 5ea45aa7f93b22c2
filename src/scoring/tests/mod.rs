use std::{sync::Arc, thread};

use crate::config::ScoringConfig;
use crate::scoring::{
    AnalysisResult, Category, CategoryMatch, DegradationKind, StyleAnalyzer, TextAnalyzer,
    TextStatistics, accept_match, normalize::Sigmoid, truncate_chars,
};

const HEALTH_SAMPLE: &str = "This is a test sentence.";
const SHOCKING_NEWS: &str = "ഞെട്ടിക്കുന്ന വാർത്ത!!!";

const FORMAL_PASSAGE: &str = "സർക്കാർ പുറത്തിറക്കിയ റിപ്പോർട്ട് പ്രകാരം സംസ്ഥാനത്തെ മഴക്കെടുതിയിൽ നാശനഷ്ടങ്ങൾ വിലയിരുത്തി. \
ആരോഗ്യ വകുപ്പിന്റെ കണക്കുകൾ അനുസരിച്ച് ക്യാമ്പുകളിൽ ആവശ്യമായ സൗകര്യങ്ങൾ ഒരുക്കിയിട്ടുണ്ട്. \
ജില്ലാ ഭരണകൂടം വിശദമായ പ്രസ്താവന പുറത്തിറക്കി.";

const CLICKBAIT_PASSAGE: &str = "ഞെട്ടിക്കുന്ന വാർത്ത!!! നിങ്ങൾ വിശ്വസിക്കാനാകില്ല!!! വൈറൽ വീഡിയോ കാണൂ!!! \
ക്ലിക്ക് ചെയ്യൂ!!! വായിച്ചു നോക്കൂ!!! ";

fn analyzer() -> StyleAnalyzer {
    StyleAnalyzer::default()
}

fn assert_close(actual: f64, expected: f64, tolerance: f64) {
    assert!(
        (actual - expected).abs() < tolerance,
        "expected {expected}, got {actual}"
    );
}

fn assert_in_range(result: &AnalysisResult) {
    for value in [result.sensationalism, result.writing_style, result.clickbait] {
        assert!((0.0..=100.0).contains(&value), "{value} out of range");
    }
}

fn take_chars(text: &str, count: usize) -> String {
    text.chars().take(count).collect()
}

#[test]
fn test_empty_input_scores_zero() {
    let report = analyzer().analyze("");

    assert_eq!(report.result, AnalysisResult::zero());
    assert_eq!(report.degradations.len(), 1);
    assert_eq!(report.degradations[0].kind, DegradationKind::InvalidInput);
}

#[test]
fn test_short_input_scores_zero() {
    let analyzer = analyzer();
    for text in ["   ", "short", "  nine char  ", "ഞെട്ടൽ!!!"] {
        assert_eq!(analyzer.analyze_text(text), AnalysisResult::zero(), "{text:?}");
    }
}

#[test]
fn test_minimum_length_counts_trimmed_chars() {
    let analyzer = analyzer();
    assert!(analyzer.analyze_text("    0123456789    ").clickbait > 0.0);
    assert!(analyzer.analyze_text("    012345678    ").is_zero());
}

#[test]
fn test_health_sample_literal_scores() {
    let report = analyzer().analyze(HEALTH_SAMPLE);

    assert!(!report.malayalam_flavored);
    assert!(report.degradations.is_empty());
    assert_eq!(report.matches.clickbait.count, 0);
    assert_eq!(report.matches.writing_style.count, 0);

    // One 5-word sentence with 5 distinct words:
    // length 25, diversity 100, combined 31.25.
    assert_eq!(report.style_factors.length_factor, 25.0);
    assert_eq!(report.style_factors.diversity_factor, 100.0);

    assert_close(report.result.clickbait, 0.669285, 1e-6);
    assert_close(report.result.writing_style, 13.296, 1e-3);
    assert_close(report.result.sensationalism, 8.690, 1e-3);
}

#[test]
fn test_health_sample_matches_formula() {
    let sigmoid = Sigmoid::default();
    let clickbait = sigmoid.apply(0.0).unwrap();
    let writing_style = sigmoid.apply(31.25).unwrap();
    let sensationalism = sigmoid
        .apply(clickbait * 0.7 + (100.0 - writing_style) * 0.3)
        .unwrap();

    let result = analyzer().analyze_text(HEALTH_SAMPLE);
    assert_close(result.clickbait, clickbait, 1e-12);
    assert_close(result.writing_style, writing_style, 1e-12);
    assert_close(result.sensationalism, sensationalism, 1e-12);
}

#[test]
fn test_shocking_news_raises_clickbait() {
    let analyzer = analyzer();
    let baseline = analyzer.analyze_text(HEALTH_SAMPLE);
    let report = analyzer.analyze(SHOCKING_NEWS);

    assert!(report.malayalam_flavored);
    assert_eq!(report.matches.clickbait.count, 2);
    assert!(report.result.clickbait > baseline.clickbait);

    // (25 + 20) * (1 + ln 2) against the Malayalam ceiling of 500
    let raw = 45.0 * (1.0 + 2f64.ln()) / 500.0 * 100.0;
    assert_close(
        report.result.clickbait,
        Sigmoid::default().apply(raw).unwrap(),
        1e-9,
    );
}

#[test]
fn test_content_past_truncation_boundary_is_ignored() {
    let analyzer = analyzer();
    let calm = "സംസ്ഥാനത്ത് ഇന്ന് മഴ തുടരും. ".repeat(200);
    let prefix = take_chars(&calm, 3000);
    let tail = " ഞെട്ടിക്കുന്ന വാർത്ത!!! നിങ്ങൾ വിശ്വസിക്കാനാകില്ല!!!";
    let full: String = prefix.chars().chain(tail.chars().cycle()).take(4000).collect();

    assert_eq!(full.chars().count(), 4000);
    assert!(
        analyzer.bank().match_category(&full, Category::Clickbait).count
            > analyzer.bank().match_category(&prefix, Category::Clickbait).count
    );

    let full_report = analyzer.analyze(&full);
    let prefix_report = analyzer.analyze(&prefix);

    assert!(full_report.truncated);
    assert!(!prefix_report.truncated);
    assert_eq!(full_report.result, prefix_report.result);
    assert_eq!(full_report.matches, prefix_report.matches);
}

#[test]
fn test_appending_beyond_boundary_is_idempotent() {
    let analyzer = analyzer();
    let text = "Officials said the river level is rising! Residents were moved. ".repeat(60);
    assert!(text.chars().count() > 3000);

    let beyond: String = text.chars().skip(3000).collect();
    let extended = format!("{text}{beyond}");

    assert_eq!(analyzer.analyze_text(&text), analyzer.analyze_text(&extended));
}

#[test]
fn test_formal_passage_outscores_clickbait_passage_on_writing_style() {
    let analyzer = analyzer();
    let length = FORMAL_PASSAGE.chars().count();
    let clickbait_passage = take_chars(&CLICKBAIT_PASSAGE.repeat(4), length);
    assert_eq!(clickbait_passage.chars().count(), length);

    let formal = analyzer.analyze(FORMAL_PASSAGE);
    let clickbait = analyzer.analyze(&clickbait_passage);

    assert!(formal.matches.writing_style.count >= 3);
    assert_eq!(formal.matches.clickbait.count, 0);
    assert!(clickbait.matches.clickbait.count > 0);
    assert!(formal.result.writing_style > clickbait.result.writing_style);
    assert!(formal.result.clickbait < clickbait.result.clickbait);
}

#[test]
fn test_deterministic() {
    let first = analyzer();
    let second = analyzer();
    for text in [HEALTH_SAMPLE, SHOCKING_NEWS, FORMAL_PASSAGE, CLICKBAIT_PASSAGE] {
        let a = first.analyze_text(text);
        let b = first.analyze_text(text);
        let c = second.analyze_text(text);
        for (x, y) in [(a, b), (a, c)] {
            assert_eq!(x.clickbait.to_bits(), y.clickbait.to_bits());
            assert_eq!(x.writing_style.to_bits(), y.writing_style.to_bits());
            assert_eq!(x.sensationalism.to_bits(), y.sensationalism.to_bits());
        }
    }
}

#[test]
fn test_scores_stay_in_range() {
    let analyzer = analyzer();
    let inputs = [
        HEALTH_SAMPLE.to_string(),
        SHOCKING_NEWS.to_string(),
        FORMAL_PASSAGE.to_string(),
        CLICKBAIT_PASSAGE.repeat(50),
        "!".repeat(5000),
        "★☆▒░".repeat(300),
        "ബ്രേക്കിംഗ്!! 50 പേർ മരിച്ചു!! ഭീകരമായ ദുരന്തം!! ".repeat(40),
        "1234567890 ".repeat(10),
        "\n\n\t mixed Kerala വാർത്ത ... ??? !!! \n".repeat(20),
    ];

    for input in &inputs {
        assert_in_range(&analyzer.analyze_text(input));
    }
}

#[test]
fn test_more_clickbait_never_lowers_clickbait() {
    let analyzer = analyzer();
    let base = "ഇത് ഒരു സാധാരണ വാർത്തയാണ്. ഞെട്ടിക്കുന്ന വാർത്ത പുറത്ത്.";
    let extended = format!("{base} ഞെട്ടിക്കുന്ന വാർത്ത വീണ്ടും.");
    let more = format!("{extended} ക്ലിക്ക് ചെയ്യൂ!!!");

    let base_score = analyzer.analyze_text(base).clickbait;
    let extended_score = analyzer.analyze_text(&extended).clickbait;
    let more_score = analyzer.analyze_text(&more).clickbait;

    assert!(extended_score > base_score);
    assert!(more_score > extended_score);
}

#[test]
fn test_malayalam_flavor_scales_style_factors() {
    let analyzer = analyzer();
    let stats = TextStatistics {
        average_sentence_length: 4.0,
        lexical_diversity: 0.3,
        ..TextStatistics::default()
    };

    let plain = analyzer.style_factors(&stats, false);
    let flavored = analyzer.style_factors(&stats, true);

    assert_eq!(plain.length_factor, 20.0);
    assert_eq!(plain.diversity_factor, 60.0);
    assert_close(flavored.length_factor, plain.length_factor * 0.8, 1e-12);
    assert_close(flavored.diversity_factor, plain.diversity_factor * 1.2, 1e-12);
}

#[test]
fn test_malayalam_multipliers_apply_after_cap() {
    let analyzer = analyzer();
    let stats = TextStatistics {
        average_sentence_length: 30.0,
        lexical_diversity: 0.9,
        ..TextStatistics::default()
    };

    let flavored = analyzer.style_factors(&stats, true);
    assert_close(flavored.length_factor, 80.0, 1e-12);
    assert_close(flavored.diversity_factor, 120.0, 1e-12);
}

#[test]
fn test_report_uses_flavored_factors_for_malayalam_text() {
    let analyzer = analyzer();
    let report = analyzer.analyze(FORMAL_PASSAGE);

    assert!(report.malayalam_ratio > 0.3);
    assert!(report.malayalam_flavored);
    assert_eq!(report.language.as_deref(), Some("ml"));
    assert_eq!(
        report.style_factors,
        analyzer.style_factors(&report.statistics, true)
    );
}

#[test]
fn test_scores_only_path_skips_language_detection() {
    let analyzer = analyzer();

    assert_eq!(analyzer.run(FORMAL_PASSAGE, false).language, None);
    assert_eq!(
        analyzer.run(FORMAL_PASSAGE, true).language.as_deref(),
        Some("ml")
    );
    assert_eq!(
        analyzer.analyze_text(FORMAL_PASSAGE),
        analyzer.analyze(FORMAL_PASSAGE).result
    );
}

#[test]
fn test_non_finite_match_score_degrades_to_zero() {
    let mut degradations = Vec::new();
    let result = accept_match(
        Category::Sensationalism,
        CategoryMatch {
            score: f64::INFINITY,
            count: 3,
        },
        &mut degradations,
    );

    assert_eq!(result, CategoryMatch::default());
    assert_eq!(degradations.len(), 1);
    assert_eq!(degradations[0].kind, DegradationKind::PatternMatch);
    assert_eq!(degradations[0].category, Some(Category::Sensationalism));
}

#[test]
fn test_finite_match_score_passes_through() {
    let mut degradations = Vec::new();
    let matched = CategoryMatch {
        score: 42.5,
        count: 2,
    };

    assert_eq!(
        accept_match(Category::Clickbait, matched, &mut degradations),
        matched
    );
    assert!(degradations.is_empty());
}

#[test]
fn test_mostly_latin_text_is_not_flavored() {
    let report = analyzer().analyze("Kerala news update: heavy rain expected today (മഴ).");
    assert!(report.malayalam_ratio > 0.0);
    assert!(!report.malayalam_flavored);
}

#[test]
fn test_zero_ceiling_degrades_clickbait_only() {
    let config = ScoringConfig {
        clickbait_max_observed_other: 0.0,
        ..ScoringConfig::default()
    };
    let analyzer = StyleAnalyzer::new(config, 16);
    let report = analyzer.analyze(HEALTH_SAMPLE);

    let kinds: Vec<_> = report.degradations.iter().map(|d| d.kind).collect();
    assert_eq!(kinds, vec![DegradationKind::Clickbait]);
    assert_eq!(report.result.clickbait, 0.0);

    let writing_style = report.result.writing_style;
    let expected = Sigmoid::default()
        .apply((100.0 - writing_style) * 0.3)
        .unwrap();
    assert_close(report.result.sensationalism, expected, 1e-12);
}

#[test]
fn test_broken_sigmoid_degrades_every_step() {
    let config = ScoringConfig {
        sigmoid: Sigmoid::new(f64::NAN, 50.0),
        ..ScoringConfig::default()
    };
    let analyzer = StyleAnalyzer::new(config, 16);
    let report = analyzer.analyze(SHOCKING_NEWS);

    let kinds: Vec<_> = report.degradations.iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DegradationKind::WritingStyle,
            DegradationKind::Clickbait,
            DegradationKind::Sensationalism,
        ]
    );
    assert_eq!(report.result.writing_style, 50.0);
    assert_eq!(report.result.clickbait, 0.0);
    assert_eq!(report.result.sensationalism, 0.0);
}

#[test]
fn test_preprocessing_is_cached_across_calls() {
    let analyzer = StyleAnalyzer::new(ScoringConfig::default(), 4);
    analyzer.analyze_text(FORMAL_PASSAGE);
    analyzer.analyze_text(FORMAL_PASSAGE);

    let stats = analyzer.preprocessor().cache_stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.len, 1);
}

#[test]
fn test_shared_across_threads() {
    let analyzer = Arc::new(StyleAnalyzer::new(ScoringConfig::default(), 8));
    let expected = analyzer.analyze_text(CLICKBAIT_PASSAGE);

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let analyzer = Arc::clone(&analyzer);
            thread::spawn(move || {
                (0..25)
                    .map(|_| analyzer.analyze_text(CLICKBAIT_PASSAGE))
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for result in handle.join().unwrap() {
            assert_eq!(result, expected);
        }
    }
}

#[test]
fn test_truncate_chars_respects_char_boundaries() {
    let (cut, truncated) = truncate_chars("മലയാളം", 3);
    assert_eq!(cut, "മലയ");
    assert!(truncated);

    let (whole, truncated) = truncate_chars("abc", 3);
    assert_eq!(whole, "abc");
    assert!(!truncated);
}

#[cfg(feature = "fuzz")]
mod fuzz {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn test_scores_always_in_range(text in "\\PC{0,400}") {
            let result = analyzer().analyze_text(&text);
            assert_in_range(&result);
        }

        #[test]
        fn test_short_inputs_always_zero(text in "[ \\t]{0,5}[a-zഅ-ഹ!?.]{0,9}[ \\t]{0,5}") {
            prop_assume!(text.trim().chars().count() < 10);
            prop_assert!(analyzer().analyze_text(&text).is_zero());
        }

        #[test]
        fn test_malayalam_text_in_range(text in "[\\x{0D00}-\\x{0D7F} !?.]{10,300}") {
            let result = analyzer().analyze_text(&text);
            assert_in_range(&result);
        }
    }
}
