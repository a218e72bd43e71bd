//! Embedding model handle for semantic ranking (Model2Vec)

use crate::error::{Result, ResumeAnalyzerError};
use log::{debug, info, warn};
use model2vec_rs::model::StaticModel;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Anything that can turn texts into dense vectors
pub trait TextEmbedder: Send + Sync {
    fn model_name(&self) -> &str;

    /// One vector per input text, in input order
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;
}

pub struct EmbeddingEngine {
    model: StaticModel,
    model_name: String,
}

impl EmbeddingEngine {
    /// Load a Model2Vec model from a local directory
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(ResumeAnalyzerError::ModelNotFound(model_path.display().to_string()));
        }

        let start_time = Instant::now();
        info!("Loading embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )?;

        info!("Embedding model loaded in {:.2?}", start_time.elapsed());

        let model_name = model_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| model_path.display().to_string());

        Ok(Self { model, model_name })
    }

    pub fn encode_texts(&self, texts: &[String]) -> Vec<Vec<f32>> {
        self.model.encode(texts)
    }

}

impl TextEmbedder for EmbeddingEngine {
    fn model_name(&self) -> &str {
        &self.model_name
    }

    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let embeddings = self.encode_texts(texts);
        if embeddings.len() != texts.len() {
            return Err(ResumeAnalyzerError::Embedding(format!(
                "Expected {} embeddings, got {}",
                texts.len(),
                embeddings.len()
            )));
        }
        Ok(embeddings)
    }
}

/// Cosine similarity between two embeddings
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(ResumeAnalyzerError::Embedding(
            format!("Embedding dimensions don't match: {} vs {}", a.len(), b.len())
        ));
    }

    if a.is_empty() {
        return Ok(0.0);
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        Ok(0.0)
    } else {
        Ok(dot_product / (norm_a * norm_b))
    }
}

/// Embedding model loaded at most once, on first use.
///
/// A missing model directory or a failed load is remembered as "unavailable";
/// later calls do not retry.
pub struct LazyEmbeddingModel {
    model_path: PathBuf,
    cell: OnceCell<Option<Arc<EmbeddingEngine>>>,
}

impl LazyEmbeddingModel {
    pub fn new(model_path: PathBuf) -> Self {
        Self {
            model_path,
            cell: OnceCell::new(),
        }
    }

    pub fn model_path(&self) -> &Path {
        &self.model_path
    }

    /// Shared handle to the model, or `None` when it cannot be loaded
    pub fn get(&self) -> Option<Arc<EmbeddingEngine>> {
        self.cell
            .get_or_init(|| {
                if !self.model_path.exists() {
                    debug!("No embedding model at {}", self.model_path.display());
                    return None;
                }

                match EmbeddingEngine::load(&self.model_path) {
                    Ok(engine) => Some(Arc::new(engine)),
                    Err(e) => {
                        warn!("Embedding model unavailable, using lexical ranking: {}", e);
                        None
                    }
                }
            })
            .clone()
    }

    pub fn is_initialized(&self) -> bool {
        self.cell.get().is_some()
    }
}
