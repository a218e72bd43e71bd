//! Basic text statistics and Flesch reading ease

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Invalid word regex"));
static SENTENCE_END_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[.!?]+").expect("Invalid sentence regex"));
static VOWEL_GROUP_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[aeiouy]+").expect("Invalid vowel regex"));

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStatistics {
    pub word_count: usize,
    pub sentence_count: usize,
    /// 0 (very hard) to 100 (very easy), one decimal
    pub flesch_reading_ease: f64,
}

impl TextStatistics {
    pub fn from_text(text: &str) -> Self {
        let words: Vec<&str> = WORD_REGEX.find_iter(text).map(|m| m.as_str()).collect();
        let sentence_count = SENTENCE_END_REGEX.find_iter(text).count().max(1);

        Self {
            word_count: words.len(),
            sentence_count,
            flesch_reading_ease: flesch_reading_ease(&words, sentence_count),
        }
    }
}

fn syllables(word: &str) -> usize {
    VOWEL_GROUP_REGEX.find_iter(&word.to_lowercase()).count().max(1)
}

fn flesch_reading_ease(words: &[&str], sentence_count: usize) -> f64 {
    let word_count = words.len().max(1) as f64;
    let syllable_count: usize = words.iter().map(|w| syllables(w)).sum();

    let score = 206.835
        - 1.015 * (word_count / sentence_count as f64)
        - 84.6 * (syllable_count as f64 / word_count);

    (score.clamp(0.0, 100.0) * 10.0).round() / 10.0
}
