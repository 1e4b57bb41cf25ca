//! Dense text embeddings and cosine similarity

use crate::config::Config;
use crate::error::{RankerError, Result};
use crate::processing::embedding_manager::EmbeddingModelManager;
use anyhow::Context;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::time::Instant;

/// Maps a text to a fixed-length vector. Both documents of a comparison must
/// go through the same instance.
pub trait Embedder: Send + Sync {
    fn embed(&self, text: &str) -> Vec<f32>;

    fn name(&self) -> &str;

    fn dimension(&self) -> usize;
}

/// Model2Vec static embeddings
pub struct StaticModelEmbedder {
    model: StaticModel,
    model_name: String,
    dimension: usize,
}

impl StaticModelEmbedder {
    pub fn from_path(model_path: &Path, model_name: &str) -> Result<Self> {
        let start_time = Instant::now();

        info!("Loading Model2Vec embedding model from: {}", model_path.display());

        let model = StaticModel::from_pretrained(
            model_path,
            None, // token
            None, // normalize
            None, // subfolder
        )
        .with_context(|| format!("Failed to load model from {}", model_path.display()))?;

        let dimension = model.encode_single("dimension probe").len();

        info!("Model loaded in {:.2?} ({} dimensions)", start_time.elapsed(), dimension);

        Ok(Self {
            model,
            model_name: model_name.to_string(),
            dimension,
        })
    }
}

impl Embedder for StaticModelEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        self.model.encode_single(text)
    }

    fn name(&self) -> &str {
        &self.model_name
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Feature-hashing bag-of-words embedder.
///
/// Deterministic and model-free; used when no Model2Vec model is available.
#[derive(Debug, Clone)]
pub struct HashingEmbedder {
    dimension: usize,
}

impl HashingEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }

    fn bucket(&self, token: &str) -> usize {
        let mut hasher = DefaultHasher::new();
        token.hash(&mut hasher);
        (hasher.finish() % self.dimension as u64) as usize
    }
}

impl Default for HashingEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Embedder for HashingEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        for token in text.split_whitespace() {
            vector[self.bucket(token)] += 1.0;
        }

        let norm = vector.iter().map(|v| v * v).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        vector
    }

    fn name(&self) -> &str {
        "hashing-bow"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }
}

/// Cosine similarity in `[-1, 1]`; empty or zero vectors give 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(RankerError::Processing(format!(
            "Embedding dimensions don't match: {} vs {}",
            a.len(),
            b.len()
        )));
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

/// One-time embedder setup for a run.
///
/// `model_override` takes precedence over the configured model. When loading
/// fails and the config allows it, the hashing embedder is returned instead.
pub async fn load_embedder(config: &Config, model_override: Option<&str>) -> Result<Box<dyn Embedder>> {
    let model = model_override.unwrap_or(config.models.embedding_model.as_str());

    match load_static_model(config, model).await {
        Ok(embedder) => Ok(Box::new(embedder)),
        Err(e) if config.models.allow_hashing_fallback => {
            warn!("Could not load embedding model '{}': {}", model, e);
            warn!("Falling back to hashing embedder");
            Ok(Box::new(HashingEmbedder::new(config.models.hashing_dimension)))
        }
        Err(e) => Err(e),
    }
}

async fn load_static_model(config: &Config, model: &str) -> Result<StaticModelEmbedder> {
    let model_path = resolve_model_path(config, model).await?;
    let model_name = model.to_string();

    tokio::task::spawn_blocking(move || StaticModelEmbedder::from_path(&model_path, &model_name))
        .await
        .map_err(|e| RankerError::Embedding(format!("Model loading task failed: {}", e)))?
}

/// A local directory is used as-is; anything else goes through the model
/// manager, downloading on first use.
async fn resolve_model_path(config: &Config, model: &str) -> Result<PathBuf> {
    let local = PathBuf::from(model);
    if local.is_dir() {
        return Ok(local);
    }

    let mut manager = EmbeddingModelManager::new(config.models_dir().clone()).await?;
    let model_id = manager
        .resolve_model_id(model)
        .ok_or_else(|| RankerError::ModelNotFound(model.to_string()))?;

    manager.ensure_model_available(&model_id).await
}
