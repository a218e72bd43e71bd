//! Phrase ranking against a document
//!
//! Two interchangeable strategies behind [`PhraseRanker`]: cosine similarity
//! of embeddings when a model handle is supplied, lexical token overlap
//! otherwise. [`SemanticRanker`] picks one at construction and falls back to
//! the lexical strategy whenever the embedding path errors, so callers always
//! get a ranking.

use crate::error::{Result, ResumeAnalyzerError};
use crate::processing::embeddings::{cosine_similarity, TextEmbedder};
use log::{debug, warn};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_TOP_K: usize = 10;

static WORD_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\w+").expect("Invalid word regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedPhrase {
    pub phrase: String,
    /// Similarity to the document, 0..=100
    pub score: u8,
}

pub trait PhraseRanker: Send + Sync {
    fn name(&self) -> &str;

    /// Score every candidate; ordering is left to the caller
    fn score(&self, document: &str, candidates: &[String]) -> Result<Vec<RankedPhrase>>;
}

/// Share of a phrase's tokens that also occur in the document
#[derive(Debug, Clone, Copy, Default)]
pub struct LexicalRanker;

impl LexicalRanker {
    pub fn new() -> Self {
        Self
    }
}

fn word_tokens(text: &str) -> HashSet<String> {
    WORD_REGEX
        .find_iter(&text.to_lowercase())
        .map(|m| m.as_str().to_string())
        .collect()
}

impl PhraseRanker for LexicalRanker {
    fn name(&self) -> &str {
        "lexical-overlap"
    }

    fn score(&self, document: &str, candidates: &[String]) -> Result<Vec<RankedPhrase>> {
        let doc_tokens = word_tokens(document);

        Ok(candidates
            .iter()
            .map(|candidate| {
                let phrase_tokens = word_tokens(candidate);
                let overlap = phrase_tokens.intersection(&doc_tokens).count();
                let total = phrase_tokens.len().max(1);
                let score = (100.0 * overlap as f64 / total as f64).round();

                RankedPhrase {
                    phrase: candidate.clone(),
                    score: score as u8,
                }
            })
            .collect())
    }
}

/// Cosine similarity between the document embedding and each phrase embedding
pub struct EmbeddingRanker {
    embedder: Arc<dyn TextEmbedder>,
}

impl EmbeddingRanker {
    pub fn new(embedder: Arc<dyn TextEmbedder>) -> Self {
        Self { embedder }
    }
}

impl PhraseRanker for EmbeddingRanker {
    fn name(&self) -> &str {
        self.embedder.model_name()
    }

    fn score(&self, document: &str, candidates: &[String]) -> Result<Vec<RankedPhrase>> {
        let mut texts = Vec::with_capacity(candidates.len() + 1);
        texts.push(document.to_string());
        texts.extend(candidates.iter().cloned());

        let embeddings = self.embedder.embed(&texts)?;
        let (doc_embedding, phrase_embeddings) = embeddings
            .split_first()
            .ok_or_else(|| {
                ResumeAnalyzerError::Embedding("Embedder returned no vectors".to_string())
            })?;

        if phrase_embeddings.len() != candidates.len() {
            return Err(ResumeAnalyzerError::Embedding(format!(
                "Expected {} phrase embeddings, got {}",
                candidates.len(),
                phrase_embeddings.len()
            )));
        }

        candidates
            .iter()
            .zip(phrase_embeddings)
            .map(|(candidate, embedding)| {
                let similarity = cosine_similarity(doc_embedding, embedding)?;
                let score = if similarity.is_finite() {
                    (similarity as f64 * 100.0).round().clamp(0.0, 100.0)
                } else {
                    0.0
                };

                Ok(RankedPhrase {
                    phrase: candidate.clone(),
                    score: score as u8,
                })
            })
            .collect()
    }
}

/// Ranking entry point; never fails
pub struct SemanticRanker {
    primary: Option<Box<dyn PhraseRanker>>,
    fallback: LexicalRanker,
    top_k: usize,
}

impl SemanticRanker {
    /// Embedding ranking when a model handle is given, lexical otherwise
    pub fn new(embedder: Option<Arc<dyn TextEmbedder>>, top_k: usize) -> Self {
        let primary = embedder.map(|e| Box::new(EmbeddingRanker::new(e)) as Box<dyn PhraseRanker>);
        Self {
            primary,
            fallback: LexicalRanker::new(),
            top_k,
        }
    }

    pub fn lexical(top_k: usize) -> Self {
        Self::new(None, top_k)
    }

    /// Name of the strategy used when nothing fails
    pub fn strategy_name(&self) -> &str {
        self.primary
            .as_ref()
            .map(|p| p.name())
            .unwrap_or_else(|| self.fallback.name())
    }

    pub fn is_semantic(&self) -> bool {
        self.primary.is_some()
    }

    /// Candidates ranked by descending score, at most `top_k` of them.
    ///
    /// Ties keep the candidates' input order. Empty document or no
    /// candidates give an empty ranking.
    pub fn rank(&self, document: &str, candidates: &[String]) -> Vec<RankedPhrase> {
        if document.trim().is_empty() || candidates.is_empty() {
            return Vec::new();
        }

        let scored = match &self.primary {
            Some(primary) => match primary.score(document, candidates) {
                Ok(scored) => scored,
                Err(e) => {
                    warn!(
                        "{} ranking failed, falling back to lexical overlap: {}",
                        primary.name(),
                        e
                    );
                    self.lexical_scores(document, candidates)
                }
            },
            None => self.lexical_scores(document, candidates),
        };

        let mut ranked = scored;
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked.truncate(self.top_k);

        debug!(
            "Ranked {} of {} candidates with {}",
            ranked.len(),
            candidates.len(),
            self.strategy_name()
        );
        ranked
    }

    fn lexical_scores(&self, document: &str, candidates: &[String]) -> Vec<RankedPhrase> {
        // The lexical scorer has no failure path
        self.fallback.score(document, candidates).unwrap_or_default()
    }
}

impl Default for SemanticRanker {
    fn default() -> Self {
        Self::lexical(DEFAULT_TOP_K)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Embeds a text as counts of a few marker words
    struct KeywordEmbedder;

    impl TextEmbedder for KeywordEmbedder {
        fn model_name(&self) -> &str {
            "keyword-test-embedder"
        }

        fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let markers = ["python", "cloud", "design"];
            Ok(texts
                .iter()
                .map(|t| {
                    let lower = t.to_lowercase();
                    markers.iter().map(|m| lower.matches(m).count() as f32).collect()
                })
                .collect())
        }
    }

    struct FailingEmbedder;

    impl TextEmbedder for FailingEmbedder {
        fn model_name(&self) -> &str {
            "failing"
        }

        fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(ResumeAnalyzerError::Embedding("backend offline".to_string()))
        }
    }

    fn candidates(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_lexical_scores() {
        let ranker = LexicalRanker::new();
        let scored = ranker
            .score("Built data pipelines in Python", &candidates(&["python", "data science", "rust"]))
            .unwrap();

        assert_eq!(scored[0].score, 100);
        assert_eq!(scored[1].score, 50);
        assert_eq!(scored[2].score, 0);
    }

    #[test]
    fn test_lexical_ranking_order_and_ties() {
        let ranker = SemanticRanker::lexical(10);
        let ranked = ranker.rank(
            "python and docker",
            &candidates(&["rust", "docker", "machine learning", "python"]),
        );

        let phrases: Vec<&str> = ranked.iter().map(|r| r.phrase.as_str()).collect();
        assert_eq!(phrases, vec!["docker", "python", "rust", "machine learning"]);
        assert_eq!(ranker.strategy_name(), "lexical-overlap");
        assert!(!ranker.is_semantic());
    }

    #[test]
    fn test_top_k_truncates() {
        let ranker = SemanticRanker::lexical(2);
        let ranked = ranker.rank("a b c", &candidates(&["a", "b", "c", "d"]));
        assert_eq!(ranked.len(), 2);
    }

    #[test]
    fn test_empty_inputs() {
        let ranker = SemanticRanker::default();
        assert!(ranker.rank("", &candidates(&["python"])).is_empty());
        assert!(ranker.rank("python", &[]).is_empty());
    }

    #[test]
    fn test_embedding_ranker() {
        let ranker = SemanticRanker::new(Some(Arc::new(KeywordEmbedder)), 10);
        let ranked = ranker.rank(
            "python python cloud",
            &candidates(&["design", "cloud", "python"]),
        );

        assert!(ranker.is_semantic());
        assert_eq!(ranker.strategy_name(), "keyword-test-embedder");
        assert_eq!(ranked[0].phrase, "python");
        assert_eq!(ranked[0].score, 89);
        assert_eq!(ranked[1].phrase, "cloud");
        assert_eq!(ranked[1].score, 45);
        assert_eq!(ranked[2].phrase, "design");
        assert_eq!(ranked[2].score, 0);
    }

    #[test]
    fn test_same_shape_in_both_modes() {
        let items = candidates(&["python", "cloud"]);
        let semantic = SemanticRanker::new(Some(Arc::new(KeywordEmbedder)), 10).rank("python cloud", &items);
        let lexical = SemanticRanker::lexical(10).rank("python cloud", &items);

        assert_eq!(semantic.len(), lexical.len());
        assert!(semantic.iter().all(|r| r.score <= 100));
    }

    #[test]
    fn test_failing_backend_falls_back() {
        let ranker = SemanticRanker::new(Some(Arc::new(FailingEmbedder)), 10);
        let ranked = ranker.rank("python", &candidates(&["python", "go"]));

        assert_eq!(ranked[0], RankedPhrase { phrase: "python".to_string(), score: 100 });
        assert_eq!(ranked[1].score, 0);
    }
}
