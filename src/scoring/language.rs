use std::ops::RangeInclusive;
use whatlang::{Lang, detect};

use crate::scoring::errors::ScoreError;

pub const MALAYALAM_RANGE: RangeInclusive<char> = '\u{0D00}'..='\u{0D7F}';

const MIN_CONFIDENCE: f64 = 0.25;
const MIN_TEXT_CHARS: usize = 20;

pub fn is_malayalam(c: char) -> bool {
    MALAYALAM_RANGE.contains(&c)
}

/// Fraction of chars in the Malayalam block.
pub fn malayalam_ratio(text: &str) -> Result<f64, ScoreError> {
    let (malayalam, total) = text.chars().fold((0usize, 0usize), |(m, t), c| {
        (m + usize::from(is_malayalam(c)), t + 1)
    });

    if total == 0 {
        return Err(ScoreError::ZeroDenominator("malayalam ratio"));
    }
    Ok(malayalam as f64 / total as f64)
}

pub fn detect_language(text: &str) -> Option<String> {
    if text.trim().chars().count() < MIN_TEXT_CHARS {
        return None;
    }

    if let Some(info) = detect(text)
        && info.confidence() >= MIN_CONFIDENCE
    {
        return Some(lang_to_code(info.lang()));
    }

    None
}

fn lang_to_code(lang: Lang) -> String {
    match lang {
        Lang::Mal => "ml".to_string(),
        Lang::Eng => "en".to_string(),
        Lang::Hin => "hi".to_string(),
        Lang::Tam => "ta".to_string(),
        Lang::Kan => "kn".to_string(),
        Lang::Tel => "te".to_string(),
        Lang::Ara => "ar".to_string(),
        _ => lang.code().to_string(),
    }
}
