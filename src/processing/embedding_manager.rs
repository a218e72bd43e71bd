//! Embedding model management: catalogue, download, and local discovery

use crate::error::{Result, ResumeAnalyzerError};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec directory must contain to be loadable
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];
const OPTIONAL_FILES: [&str; 1] = ["README.md"];

/// Information about an available embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub id: String,
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub dimensions: u32,
    pub description: String,
}

/// Knows which embedding models exist and which are on disk
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: BTreeSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                ResumeAnalyzerError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models: default_catalogue(),
            downloaded_models: BTreeSet::new(),
        };

        manager.scan_downloaded_models().await?;
        Ok(manager)
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            ResumeAnalyzerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && is_valid_model_directory(&entry.path()).await {
                self.downloaded_models.insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    /// Download a catalogued model from the Hugging Face Hub
    pub async fn download_model(&mut self, model_id: &str, force: bool) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .cloned()
            .ok_or_else(|| ResumeAnalyzerError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(model_id);
        if !force && self.downloaded_models.contains(model_id) {
            return Ok(model_dir);
        }

        info!(
            "Downloading embedding model {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            ResumeAnalyzerError::ModelError(format!("Failed to create model directory: {}", e))
        })?;

        let api = Api::new()
            .map_err(|e| {
                ResumeAnalyzerError::ModelError(format!("Failed to initialize HF API: {}", e))
            })?;
        let repo = api.model(model_info.repo_id.clone());

        for file in REQUIRED_FILES.iter().chain(OPTIONAL_FILES.iter()) {
            match repo.get(file).await {
                Ok(cached_path) => {
                    fs::copy(&cached_path, model_dir.join(file)).await.map_err(|e| {
                        ResumeAnalyzerError::ModelError(format!("Failed to copy {}: {}", file, e))
                    })?;
                    info!("Downloaded {}", file);
                }
                Err(e) if OPTIONAL_FILES.contains(file) => {
                    warn!("Optional file {} not available: {}", file, e);
                }
                Err(e) => {
                    return Err(ResumeAnalyzerError::ModelError(format!(
                        "Failed to download required file {}: {}",
                        file, e
                    )));
                }
            }
        }

        self.downloaded_models.insert(model_id.to_string());
        Ok(model_dir)
    }

    pub async fn remove_model(&mut self, model_id: &str) -> Result<bool> {
        if !self.downloaded_models.remove(model_id) {
            return Ok(false);
        }

        fs::remove_dir_all(self.models_dir.join(model_id)).await?;
        Ok(true)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    pub fn list_available_models(&self) -> Vec<&EmbeddingModelInfo> {
        self.available_models.values().collect()
    }

    pub fn list_downloaded_models(&self) -> Vec<String> {
        self.downloaded_models.iter().cloned().collect()
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve a model ID from an ID, a repo ID, or a display name
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .values()
            .find(|info| info.repo_id == input || info.name.to_lowercase() == input_lower)
            .map(|info| info.id.clone())
    }
}

async fn is_valid_model_directory(path: &Path) -> bool {
    for file in REQUIRED_FILES {
        if fs::metadata(path.join(file)).await.is_err() {
            return false;
        }
    }
    true
}

fn default_catalogue() -> BTreeMap<String, EmbeddingModelInfo> {
    [
        EmbeddingModelInfo {
            id: "potion-base-8M".to_string(),
            name: "Potion Base 8M".to_string(),
            repo_id: "minishlab/potion-base-8M".to_string(),
            size_mb: 33,
            dimensions: 256,
            description: "Compact Model2Vec embeddings, recommended default".to_string(),
        },
        EmbeddingModelInfo {
            id: "m2v-base".to_string(),
            name: "Model2Vec Base".to_string(),
            repo_id: "minishlab/M2V_base_output".to_string(),
            size_mb: 90,
            dimensions: 256,
            description: "Legacy Model2Vec base embeddings".to_string(),
        },
        EmbeddingModelInfo {
            id: "potion-retrieval-32M".to_string(),
            name: "Potion Retrieval 32M".to_string(),
            repo_id: "minishlab/potion-retrieval-32M".to_string(),
            size_mb: 130,
            dimensions: 512,
            description: "Larger Model2Vec model tuned for retrieval".to_string(),
        },
    ]
    .into_iter()
    .map(|info| (info.id.clone(), info))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_manager_creation() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().join("models")).await.unwrap();

        assert_eq!(manager.list_available_models().len(), 3);
        assert!(manager.list_downloaded_models().is_empty());
        assert!(temp_dir.path().join("models").exists());
    }

    #[tokio::test]
    async fn test_scan_detects_complete_models_only() {
        let temp_dir = TempDir::new().unwrap();
        let complete = temp_dir.path().join("potion-base-8M");
        let partial = temp_dir.path().join("m2v-base");
        std::fs::create_dir_all(&complete).unwrap();
        std::fs::create_dir_all(&partial).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(complete.join(file), b"{}").unwrap();
        }
        std::fs::write(partial.join("tokenizer.json"), b"{}").unwrap();

        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        assert!(manager.is_model_downloaded("potion-base-8M"));
        assert!(!manager.is_model_downloaded("m2v-base"));
        assert_eq!(manager.get_model_path("potion-base-8M"), Some(complete));
    }

    #[tokio::test]
    async fn test_remove_model() {
        let temp_dir = TempDir::new().unwrap();
        let model_dir = temp_dir.path().join("m2v-base");
        std::fs::create_dir_all(&model_dir).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(model_dir.join(file), b"{}").unwrap();
        }

        let mut manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();
        assert!(manager.remove_model("m2v-base").await.unwrap());
        assert!(!model_dir.exists());
        assert!(!manager.remove_model("m2v-base").await.unwrap());
    }

    #[tokio::test]
    async fn test_unknown_model_download() {
        let temp_dir = TempDir::new().unwrap();
        let mut manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        let result = manager.download_model("no-such-model", false).await;
        assert!(matches!(result, Err(ResumeAnalyzerError::ModelNotFound(_))));
    }

    #[tokio::test]
    async fn test_resolve_model_id() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        assert_eq!(manager.resolve_model_id("potion-base-8M"), Some("potion-base-8M".to_string()));
        assert_eq!(manager.resolve_model_id("minishlab/potion-base-8M"), Some("potion-base-8M".to_string()));
        assert_eq!(manager.resolve_model_id("model2vec base"), Some("m2v-base".to_string()));
        assert_eq!(manager.resolve_model_id("unknown"), None);
    }
}
