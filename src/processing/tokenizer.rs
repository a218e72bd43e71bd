//! Text normalization and tokenization

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use unicode_segmentation::UnicodeSegmentation;

static URL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:https?://|www\.)[^\s]+").expect("Invalid URL regex")
});

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}").expect("Invalid email regex")
});

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").expect("Invalid whitespace regex")
});

static STOP_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "also", "am", "an",
        "and", "any", "are", "as", "at", "be", "because", "been", "before", "being",
        "below", "between", "both", "but", "by", "can", "could", "did", "do", "does",
        "doing", "down", "during", "each", "etc", "few", "for", "from", "further", "had",
        "has", "have", "having", "he", "her", "here", "hers", "him", "his", "how",
        "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me",
        "more", "most", "must", "my", "myself", "no", "nor", "not", "now", "of",
        "off", "on", "once", "only", "or", "other", "our", "ours", "out", "over",
        "own", "same", "she", "should", "so", "some", "such", "than", "that", "the",
        "their", "theirs", "them", "then", "there", "these", "they", "this", "those", "through",
        "to", "too", "under", "until", "up", "us", "very", "was", "we", "were",
        "what", "when", "where", "which", "while", "who", "whom", "why", "will", "with",
        "would", "you", "your", "yours", "yourself",
    ]
    .into_iter()
    .collect()
});

/// Normalized word tokens of one document.
///
/// `tokens` is what similarity works on; `sequence` keeps the tokens in the
/// order they appeared (duplicates included) for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenSet {
    pub tokens: BTreeSet<String>,
    pub sequence: Vec<String>,
}

impl TokenSet {
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Tokenizer;

impl Tokenizer {
    pub fn new() -> Self {
        Self
    }

    /// Tokenize a document into a [`TokenSet`].
    ///
    /// Pure: the same text always yields the same set, and any Unicode input
    /// is accepted. Characters that are not alphabetic only act as separators.
    pub fn tokenize(&self, text: &str) -> TokenSet {
        let cleaned = self.clean_text(text);
        let mut sequence = Vec::new();

        for word in cleaned.unicode_words() {
            // Split "python3" or "node.js" into their alphabetic runs
            for run in word.split(|c: char| !c.is_alphabetic()) {
                if run.chars().count() < 2 || STOP_WORDS.contains(run) {
                    continue;
                }
                sequence.push(run.to_string());
            }
        }

        let tokens = sequence.iter().cloned().collect();
        TokenSet { tokens, sequence }
    }

    /// Lowercase, drop URLs and e-mail addresses, collapse whitespace
    pub fn clean_text(&self, text: &str) -> String {
        let without_urls = URL_REGEX.replace_all(text, " ");
        let without_emails = EMAIL_REGEX.replace_all(&without_urls, " ");
        normalize_whitespace(&without_emails).to_lowercase()
    }
}

/// Collapse runs of whitespace into single spaces and trim the ends
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").trim().to_string()
}
