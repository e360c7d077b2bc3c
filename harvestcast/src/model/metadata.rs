//! Model metadata sidecar
//!
//! A small JSON file written next to the model artifact. It carries
//! everything the predictor needs besides the weights: input geometry, the
//! crop vocabulary at training time, and the feature scaler statistics.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};
use crate::features::FeatureScaler;
use crate::{DEFAULT_CROPS, IMAGE_SIZE, NUM_FEATURES};

/// Metadata persisted alongside the trained model artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    /// Input image size (square)
    pub image_size: usize,

    /// Number of numeric input features
    pub num_features: usize,

    /// Crop types known at training time, in code order
    pub crop_types: Vec<String>,

    /// Per-column means of the training feature matrix
    pub feature_means: Vec<f32>,

    /// Per-column standard deviations of the training feature matrix
    pub feature_stds: Vec<f32>,
}

impl ModelMetadata {
    /// Build metadata for a freshly trained model
    pub fn new(scaler: &FeatureScaler) -> Self {
        Self {
            image_size: IMAGE_SIZE,
            num_features: NUM_FEATURES,
            crop_types: DEFAULT_CROPS.iter().map(|s| s.to_string()).collect(),
            feature_means: scaler.means.clone(),
            feature_stds: scaler.stds.clone(),
        }
    }

    /// Reconstruct the feature scaler from the persisted statistics
    pub fn scaler(&self) -> FeatureScaler {
        FeatureScaler {
            means: self.feature_means.clone(),
            stds: self.feature_stds.clone(),
        }
    }

    /// Save metadata to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HarvestError::Metadata(e.to_string()))?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Load metadata from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        serde_json::from_str(&json).map_err(|e| HarvestError::Metadata(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(crate::METADATA_FILE);

        let scaler = FeatureScaler {
            means: vec![1.5; NUM_FEATURES],
            stds: vec![2.0; NUM_FEATURES],
        };
        let metadata = ModelMetadata::new(&scaler);
        metadata.save(&path).unwrap();

        let loaded = ModelMetadata::load(&path).unwrap();
        assert_eq!(loaded.image_size, IMAGE_SIZE);
        assert_eq!(loaded.crop_types, vec!["wheat", "rice", "maize", "tomato"]);
        assert_eq!(loaded.scaler(), scaler);
    }

    #[test]
    fn test_metadata_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = ModelMetadata::load(&dir.path().join("nope.json"));
        assert!(result.is_err());
    }
}
