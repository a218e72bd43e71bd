//! Lexical similarity between token sets

use crate::processing::tokenizer::TokenSet;

/// Jaccard similarity `|a ∩ b| / |a ∪ b|` in [0.0, 1.0].
///
/// Defined as 0.0 whenever either side is empty.
pub fn jaccard_similarity(a: &TokenSet, b: &TokenSet) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let intersection = a.tokens.intersection(&b.tokens).count();
    let union = a.tokens.union(&b.tokens).count();

    intersection as f64 / union as f64
}
