#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::LazyLock;

use vartha::{
    scoring::{StyleAnalyzer, TextAnalyzer},
    url_trust::assess_url,
};

static ANALYZER: LazyLock<StyleAnalyzer> = LazyLock::new(StyleAnalyzer::default);

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    // Scores must stay in range for any input
    let result = ANALYZER.analyze_text(&text);
    for score in [result.sensationalism, result.writing_style, result.clickbait] {
        assert!((0.0..=100.0).contains(&score));
    }

    let _ = assess_url(&text, None);
});
