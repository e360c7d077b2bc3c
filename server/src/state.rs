//! Application state for the harvestcast server
//!
//! The model is loaded once at startup and shared read-only; the crop
//! vocabulary is the only mutable shared resource and sits behind a lock.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::RwLock;

use harvestcast::backend::{default_device, InferenceBackend};
use harvestcast::features::CropVocabulary;
use harvestcast::inference::predictor::Predictor;
use harvestcast::model::metadata::ModelMetadata;
use harvestcast::METADATA_FILE;

/// Server configuration
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Directory containing the model artifact and its metadata sidecar
    pub model_dir: PathBuf,
    /// Directory where uploaded images are persisted
    pub uploads_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            uploads_dir: PathBuf::from("uploads"),
        }
    }
}

/// Shared application state
pub struct AppState {
    /// Server configuration
    pub config: ServerConfig,
    /// Loaded model, immutable for the life of the process
    pub predictor: Predictor<InferenceBackend>,
    /// Crop vocabulary; grows when unseen crop types arrive
    pub vocabulary: RwLock<CropVocabulary>,
    /// Server start time
    pub started_at: Instant,
}

impl AppState {
    /// Load the model artifact and build the state.
    ///
    /// Fails (and the process should exit) when the artifact or its
    /// metadata sidecar is missing.
    pub fn initialize(config: ServerConfig) -> anyhow::Result<Self> {
        let predictor = Predictor::from_artifact(&config.model_dir, default_device())?;
        let metadata = ModelMetadata::load(&config.model_dir.join(METADATA_FILE))?;
        let vocabulary = CropVocabulary::new(&metadata.crop_types);

        Ok(Self::new(config, predictor, vocabulary))
    }

    /// Build state from already constructed parts (used in tests)
    pub fn new(
        config: ServerConfig,
        predictor: Predictor<InferenceBackend>,
        vocabulary: CropVocabulary,
    ) -> Self {
        Self {
            config,
            predictor,
            vocabulary: RwLock::new(vocabulary),
            started_at: Instant::now(),
        }
    }

    /// Get uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        self.started_at.elapsed().as_secs()
    }
}

pub type SharedState = Arc<AppState>;
