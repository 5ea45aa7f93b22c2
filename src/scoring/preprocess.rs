use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{
    collections::HashSet,
    sync::{Arc, LazyLock},
};
use utoipa::ToSchema;

use crate::scoring::cache::{BoundedCache, CacheStats};

/// Malayalam danda / double danda plus Latin terminals.
const SENTENCE_TERMINALS: [char; 5] = ['\u{0964}', '\u{0965}', '.', '!', '?'];
const CLAUSE_MARKER: &str = " - ";

static WORD_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[\w\x{0D00}-\x{0D7F}]+").expect("Failed to compile word regex")
});

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreprocessedText {
    pub sentences: Vec<String>,
    pub words: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TextStatistics {
    /// Mean sentence length in whitespace-separated words.
    pub average_sentence_length: f64,
    /// Population variance of the sentence lengths.
    pub sentence_variance: f64,
    /// Unique words over total words, in `[0, 1]`.
    pub lexical_diversity: f64,
    pub sentence_count: usize,
    pub word_count: usize,
}

impl PreprocessedText {
    pub fn statistics(&self) -> TextStatistics {
        if self.sentences.is_empty() || self.words.is_empty() {
            return TextStatistics::default();
        }

        let lengths: Vec<f64> = self
            .sentences
            .iter()
            .map(|s| s.split_whitespace().count() as f64)
            .collect();
        let count = lengths.len() as f64;
        let average = lengths.iter().sum::<f64>() / count;
        let variance = lengths.iter().map(|l| (l - average).powi(2)).sum::<f64>() / count;

        let unique: HashSet<&str> = self.words.iter().map(String::as_str).collect();

        TextStatistics {
            average_sentence_length: average,
            sentence_variance: variance,
            lexical_diversity: unique.len() as f64 / self.words.len() as f64,
            sentence_count: self.sentences.len(),
            word_count: self.words.len(),
        }
    }
}

/// Splits text into sentences and lowercase word tokens, memoized by the
/// exact input string.
pub struct Preprocessor {
    cache: BoundedCache<String, Arc<PreprocessedText>>,
    split_on_clause_marker: bool,
}

impl Preprocessor {
    pub fn new(cache_capacity: usize) -> Self {
        Self {
            cache: BoundedCache::new(cache_capacity),
            split_on_clause_marker: false,
        }
    }

    /// Also treat `" - "` as a sentence boundary.
    pub fn with_clause_marker(mut self, enabled: bool) -> Self {
        self.split_on_clause_marker = enabled;
        self
    }

    pub fn preprocess(&self, text: &str) -> Arc<PreprocessedText> {
        if let Some(cached) = self.cache.get(text) {
            return cached;
        }

        let processed = Arc::new(PreprocessedText {
            sentences: split_sentences(text, self.split_on_clause_marker),
            words: tokenize(text),
        });
        self.cache.insert(text.to_string(), Arc::clone(&processed));
        processed
    }

    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

pub fn split_sentences(text: &str, split_on_clause_marker: bool) -> Vec<String> {
    text.split(SENTENCE_TERMINALS)
        .flat_map(|fragment| {
            if split_on_clause_marker {
                fragment.split(CLAUSE_MARKER).collect::<Vec<_>>()
            } else {
                vec![fragment]
            }
        })
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn tokenize(text: &str) -> Vec<String> {
    WORD_REGEX
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect()
}
