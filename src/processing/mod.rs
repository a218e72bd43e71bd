//! Resume scoring core: tokenization, skill matching, scoring, and suggestions

pub mod tokenizer;
pub mod skills;
pub mod similarity;
pub mod scoring;
pub mod gaps;
pub mod suggestions;
pub mod embeddings;
pub mod embedding_manager;
pub mod ranker;
pub mod readability;
pub mod analyzer;

pub use analyzer::{analyze, AnalysisEngine, AnalysisResult, DetailedAnalysis};
