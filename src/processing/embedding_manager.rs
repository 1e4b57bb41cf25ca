//! Embedding model management for downloading and locating Model2Vec models

use crate::error::{RankerError, Result};
use hf_hub::api::tokio::Api;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;

/// Files a Model2Vec directory must contain to be loadable
const REQUIRED_FILES: [&str; 3] = ["model.safetensors", "tokenizer.json", "config.json"];

/// Information about an available embedding model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingModelInfo {
    pub name: String,
    pub repo_id: String,
    pub size_mb: u64,
    pub description: String,
    pub dimensions: u32,
}

/// Manager for embedding models - handles download, caching, and selection
pub struct EmbeddingModelManager {
    models_dir: PathBuf,
    available_models: BTreeMap<String, EmbeddingModelInfo>,
    downloaded_models: HashSet<String>,
}

impl EmbeddingModelManager {
    pub async fn new(models_dir: PathBuf) -> Result<Self> {
        if !models_dir.exists() {
            fs::create_dir_all(&models_dir).await.map_err(|e| {
                RankerError::ModelError(format!("Failed to create models directory: {}", e))
            })?;
        }

        let mut manager = Self {
            models_dir,
            available_models: Self::default_models(),
            downloaded_models: HashSet::new(),
        };

        manager.scan_downloaded_models().await?;

        Ok(manager)
    }

    fn default_models() -> BTreeMap<String, EmbeddingModelInfo> {
        let mut models = BTreeMap::new();

        models.insert(
            "potion-base-8M".to_string(),
            EmbeddingModelInfo {
                name: "Potion Base 8M".to_string(),
                repo_id: "minishlab/potion-base-8M".to_string(),
                size_mb: 33,
                description: "High-quality Model2Vec embeddings with 8M parameters".to_string(),
                dimensions: 256,
            },
        );

        models.insert(
            "m2v-base".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Base".to_string(),
                repo_id: "minishlab/M2V_base_output".to_string(),
                size_mb: 90,
                description: "Model2Vec base embeddings model".to_string(),
                dimensions: 256,
            },
        );

        models.insert(
            "m2v-large".to_string(),
            EmbeddingModelInfo {
                name: "Model2Vec Large".to_string(),
                repo_id: "minishlab/M2V_large_output".to_string(),
                size_mb: 250,
                description: "High-capacity Model2Vec large embeddings model".to_string(),
                dimensions: 512,
            },
        );

        models
    }

    async fn scan_downloaded_models(&mut self) -> Result<()> {
        let mut entries = fs::read_dir(&self.models_dir).await.map_err(|e| {
            RankerError::ModelError(format!("Failed to scan models directory: {}", e))
        })?;

        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_dir() && Self::is_valid_model_directory(&entry.path()).await {
                self.downloaded_models
                    .insert(entry.file_name().to_string_lossy().to_string());
            }
        }

        Ok(())
    }

    async fn is_valid_model_directory(path: &Path) -> bool {
        for file in REQUIRED_FILES {
            if fs::metadata(path.join(file)).await.is_err() {
                return false;
            }
        }
        true
    }

    /// Download a registered model from the Hugging Face Hub.
    pub async fn download_model(&mut self, model_id: &str) -> Result<PathBuf> {
        let model_info = self
            .available_models
            .get(model_id)
            .ok_or_else(|| RankerError::ModelNotFound(model_id.to_string()))?;

        let model_dir = self.models_dir.join(model_id);

        info!(
            "Downloading embedding model: {} ({} MB) from {}",
            model_info.name, model_info.size_mb, model_info.repo_id
        );

        fs::create_dir_all(&model_dir).await.map_err(|e| {
            RankerError::ModelError(format!("Failed to create model directory: {}", e))
        })?;

        let api = Api::new()
            .map_err(|e| RankerError::ModelError(format!("Failed to initialize HF API: {}", e)))?;
        let repo = api.model(model_info.repo_id.clone());

        for file in REQUIRED_FILES {
            let cached = repo.get(file).await.map_err(|e| {
                RankerError::ModelError(format!("Failed to download required file {}: {}", file, e))
            })?;
            fs::copy(&cached, model_dir.join(file))
                .await
                .map_err(|e| RankerError::ModelError(format!("Failed to copy {}: {}", file, e)))?;
            info!("  Downloaded: {}", file);
        }

        // README is informational only
        match repo.get("README.md").await {
            Ok(cached) => {
                if let Err(e) = fs::copy(&cached, model_dir.join("README.md")).await {
                    warn!("Could not copy README.md: {}", e);
                }
            }
            Err(e) => warn!("Optional file README.md not found: {}", e),
        }

        self.downloaded_models.insert(model_id.to_string());

        info!("Embedding model {} downloaded", model_info.name);
        Ok(model_dir)
    }

    pub fn get_model_path(&self, model_id: &str) -> Option<PathBuf> {
        if self.downloaded_models.contains(model_id) {
            Some(self.models_dir.join(model_id))
        } else {
            None
        }
    }

    /// Get or download a model, returning its path
    pub async fn ensure_model_available(&mut self, model_id: &str) -> Result<PathBuf> {
        if let Some(path) = self.get_model_path(model_id) {
            return Ok(path);
        }

        self.download_model(model_id).await
    }

    /// Registered models, sorted by id
    pub fn list_available_models(&self) -> Vec<(&String, &EmbeddingModelInfo)> {
        self.available_models.iter().collect()
    }

    pub fn get_model_info(&self, model_id: &str) -> Option<&EmbeddingModelInfo> {
        self.available_models.get(model_id)
    }

    pub fn is_model_downloaded(&self, model_id: &str) -> bool {
        self.downloaded_models.contains(model_id)
    }

    /// Resolve a model ID from an id, repo id or display name
    pub fn resolve_model_id(&self, input: &str) -> Option<String> {
        if self.available_models.contains_key(input) {
            return Some(input.to_string());
        }

        if let Some((id, _)) = self.available_models.iter().find(|(_, info)| info.repo_id == input) {
            return Some(id.clone());
        }

        let input_lower = input.to_lowercase();
        self.available_models
            .iter()
            .find(|(_, info)| info.name.to_lowercase() == input_lower)
            .map(|(id, _)| id.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_manager_creation_lists_registry() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        let ids: Vec<&String> = manager.list_available_models().into_iter().map(|(id, _)| id).collect();
        assert_eq!(ids, vec!["m2v-base", "m2v-large", "potion-base-8M"]);
        assert!(!manager.is_model_downloaded("potion-base-8M"));
    }

    #[tokio::test]
    async fn test_resolve_model_id() {
        let temp_dir = TempDir::new().unwrap();
        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        assert_eq!(manager.resolve_model_id("potion-base-8M"), Some("potion-base-8M".to_string()));
        assert_eq!(
            manager.resolve_model_id("minishlab/potion-base-8M"),
            Some("potion-base-8M".to_string())
        );
        assert_eq!(manager.resolve_model_id("Potion Base 8M"), Some("potion-base-8M".to_string()));
        assert_eq!(manager.resolve_model_id("unknown"), None);
    }

    #[tokio::test]
    async fn test_scan_detects_complete_model_directories() {
        let temp_dir = TempDir::new().unwrap();
        let complete = temp_dir.path().join("m2v-base");
        let partial = temp_dir.path().join("m2v-large");
        std::fs::create_dir_all(&complete).unwrap();
        std::fs::create_dir_all(&partial).unwrap();
        for file in REQUIRED_FILES {
            std::fs::write(complete.join(file), b"{}").unwrap();
        }
        std::fs::write(partial.join("tokenizer.json"), b"{}").unwrap();

        let manager = EmbeddingModelManager::new(temp_dir.path().to_path_buf()).await.unwrap();

        assert!(manager.is_model_downloaded("m2v-base"));
        assert!(!manager.is_model_downloaded("m2v-large"));
        assert_eq!(manager.get_model_path("m2v-base"), Some(complete));
        assert_eq!(manager.get_model_path("m2v-large"), None);
    }
}
