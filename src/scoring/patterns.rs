//! Weighted pattern bank for clickbait, formal register and sensational
//! phrasing.
//!
//! Rules come in two families: punctuation/symbol runs (cheap signals that
//! work for any language) and fixed Malayalam or English phrases with
//! hand-assigned weights. Every rule compiles case-insensitively; Malayalam
//! script has no case, so those patterns effectively match literally.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

/// Bumped whenever a rule or weight below changes.
pub const BANK_VERSION: &str = "2024.3-ml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Clickbait,
    WritingStyle,
    Sensationalism,
}

impl Category {
    pub const ALL: [Category; 3] = [
        Category::Clickbait,
        Category::WritingStyle,
        Category::Sensationalism,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Clickbait => "clickbait",
            Category::WritingStyle => "writing_style",
            Category::Sensationalism => "sensationalism",
        }
    }

    /// `formal_markers` is accepted as an alias of `writing_style`.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clickbait" => Some(Category::Clickbait),
            "writing_style" | "formal_markers" => Some(Category::WritingStyle),
            "sensationalism" => Some(Category::Sensationalism),
            _ => None,
        }
    }

    fn index(&self) -> usize {
        match self {
            Category::Clickbait => 0,
            Category::WritingStyle => 1,
            Category::Sensationalism => 2,
        }
    }
}

pub const CLICKBAIT_RULES: &[(&str, u32)] = &[
    // punctuation and symbol runs
    (r"!{3,}", 20),
    (r"\?{3,}", 20),
    (r"\.{4,}", 15),
    (r"[★☆]+", 12),
    (r"[▁░▒▣]+", 10),
    // "you won't believe", "you never imagined"
    (
        r"(നിങ്ങൾ|താങ്കൾ)\s+(വിശ്വസിക്കാനാകില്ല|ഒരിക്കലും ചിന്തിച്ചിട്ടില്ല)",
        30,
    ),
    (r"(ഞെട്ടിക്കുന്ന|അത്ഭുത)\s+(വാർത്ത|സംഭവം)", 25),
    (r"(രഹസ്യം|വെളിപ്പെടുത്തൽ)\s+[\w\s]+[?!]", 22),
    (r"(വൈറൽ|ട്രെൻഡിംഗ്)\s+(വീഡിയോ|ഫോട്ടോ)", 18),
    (r"പുതിയ\s+(വിവരം|അപ്ഡേറ്റ്)", 15),
    (r"\d+\s+(രഹസ്യങ്ങൾ|വഴികൾ|കാരണങ്ങൾ)", 20),
    (r"(കരളലിയിക്കുന്ന|ഹൃദയഭേദകം)\s+[\w\s]+!", 25),
    (r"എന്ത്?\s+(സംഭവിച്ചു|കാരണം)\??", 20),
    (r"എങ്ങനെ\s+[\w\s]+\?", 18),
    (r"എന്തുകൊണ്ട്\s+[\w\s]+\?", 15),
    (r"\d+\s+(വർഷം|മാസം)\s+(മുമ്പ്|ശേഷം)", 12),
    (r"(വായിച്ചു\s+നോക്കൂ|ക്ലിക്ക്\s+ചെയ്യൂ|ഷെയർ\s+ചെയ്യൂ)", 25),
    // transliterated / English
    (r"you\s+won'?t\s+believe", 30),
    (r"\b(shocking|unbelievable|jaw-dropping)\b", 20),
    (r"\bclick\s+here\b", 25),
    (r"\bgone\s+viral\b", 18),
];

pub const WRITING_STYLE_RULES: &[(&str, u32)] = &[
    (r"(പ്രസ്താവന|വിശദീകരണം)\s+[\w\s]+", 20),
    (r"(റിപ്പോർട്ട്|സർക്കാർ)\s+[\w\s]+", 18),
    (r"(പരിശോധിച്ചു|സ്ഥിരീകരിച്ചു)\s+[\w\s]+", 15),
    (r"(വാർത്താ\s+സ്രോതസ്സ്|ഉദ്ഘോഷിച്ചു)", 12),
    (r"(സംഘടിപ്പിച്ചു|നടപ്പിലാക്കി)", 10),
    // citation markers: "according to", "as per"
    (r"(അനുസരിച്ച്|പ്രകാരം)\s+[\w\s]+", 12),
    (r"\baccording\s+to\b", 12),
    (r"\b(officials?|spokesperson|ministry)\s+(said|stated|confirmed)\b", 15),
    (r"\b(press\s+release|official\s+statement)\b", 15),
];

pub const SENSATIONALISM_RULES: &[(&str, u32)] = &[
    (r"!{2,}", 15),
    (r"(ബ്രേക്കിംഗ്|ബ്രേക്കിങ്)", 20),
    (r"(ഭീകര|ഭയാനക|ദാരുണ)\w*", 25),
    (r"(ഞെട്ടൽ|ഞെട്ടിക്കുന്ന|ഞെട്ടി)", 22),
    (r"(കൂട്ടക്കൊല|കൊലപാതകം|ദുരന്തം)", 30),
    (r"(അടിയന്തര|ആപത്ത്)\s+[\w\s]+", 18),
    (r"(അവിശ്വസനീയം|അമ്പരപ്പിക്കുന്ന)", 20),
    (r"\d+\+?\s+(പേർ|വ്യക്തികൾ)\s+(മരിച്ചു|കൊല്ലപ്പെട്ടു)", 35),
    (r"\b(breaking|exclusive|horrific|outrage)\b", 15),
];

#[derive(Debug, Clone)]
pub struct PatternRule {
    pattern: Regex,
    weight: u32,
}

impl PatternRule {
    pub fn source(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn weight(&self) -> u32 {
        self.weight
    }
}

/// Weighted score and raw occurrence count for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CategoryMatch {
    pub score: f64,
    pub count: usize,
}

#[derive(Debug, Clone)]
pub struct PatternBank {
    rules: [Vec<PatternRule>; 3],
    rejected: usize,
}

impl Default for PatternBank {
    fn default() -> Self {
        Self::new()
    }
}

impl PatternBank {
    /// Build the bank from the built-in rule tables.
    pub fn new() -> Self {
        let rules = CLICKBAIT_RULES
            .iter()
            .map(|&(p, w)| (Category::Clickbait, p, w))
            .chain(
                WRITING_STYLE_RULES
                    .iter()
                    .map(|&(p, w)| (Category::WritingStyle, p, w)),
            )
            .chain(
                SENSATIONALISM_RULES
                    .iter()
                    .map(|&(p, w)| (Category::Sensationalism, p, w)),
            );
        Self::from_rules(rules)
    }

    /// Compile a custom rule set. Rules that fail to compile or carry a zero
    /// weight are logged and dropped instead of failing the whole bank.
    pub fn from_rules<'a>(rules: impl IntoIterator<Item = (Category, &'a str, u32)>) -> Self {
        let mut bank = Self {
            rules: [Vec::new(), Vec::new(), Vec::new()],
            rejected: 0,
        };

        for (category, pattern, weight) in rules {
            if weight == 0 {
                warn!(category = category.as_str(), pattern, "dropping rule with zero weight");
                bank.rejected += 1;
                continue;
            }

            match RegexBuilder::new(pattern).case_insensitive(true).build() {
                Ok(regex) => bank.rules[category.index()].push(PatternRule {
                    pattern: regex,
                    weight,
                }),
                Err(e) => {
                    warn!(
                        category = category.as_str(),
                        pattern,
                        error = %e,
                        "dropping pattern rule that failed to compile"
                    );
                    bank.rejected += 1;
                }
            }
        }

        debug!(
            clickbait = bank.rules[0].len(),
            writing_style = bank.rules[1].len(),
            sensationalism = bank.rules[2].len(),
            rejected = bank.rejected,
            "pattern bank built"
        );
        bank
    }

    pub fn rules(&self, category: Category) -> &[PatternRule] {
        &self.rules[category.index()]
    }

    /// Number of rules dropped while building the bank.
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    pub fn len(&self) -> usize {
        self.rules.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sum `weight * (1 + ln(1 + n))` over every rule with `n >= 1`
    /// non-overlapping occurrences in `text`.
    pub fn match_category(&self, text: &str, category: Category) -> CategoryMatch {
        let mut result = CategoryMatch::default();

        for rule in self.rules(category) {
            let occurrences = rule.pattern.find_iter(text).count();
            if occurrences == 0 {
                continue;
            }
            result.score += f64::from(rule.weight) * (1.0 + (occurrences as f64).ln_1p());
            result.count += occurrences;
        }

        result
    }

    /// Like [`match_category`](Self::match_category) but keyed by name.
    /// Unknown names score `(0, 0)`.
    pub fn match_named(&self, text: &str, name: &str) -> CategoryMatch {
        match Category::from_name(name) {
            Some(category) => self.match_category(text, category),
            None => CategoryMatch::default(),
        }
    }
}
