//! Error handling
//!
//! Custom error types for the harvestcast library, defined with thiserror.

use std::path::PathBuf;

use thiserror::Error;

/// Main error type for harvestcast operations
#[derive(Error, Debug)]
pub enum HarvestError {
    /// Model artifact missing or unreadable; fatal at service startup
    #[error("Trained model not found at '{0}'. Run `harvestcast train` first")]
    MissingModelArtifact(PathBuf),

    /// Error loading the model record
    #[error("Failed to load model: {0}")]
    ModelLoad(String),

    /// Error decoding or preprocessing an image
    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    /// A numeric feature field could not be parsed
    #[error("Invalid value '{value}' for field '{field}': expected a number")]
    InvalidFeature { field: String, value: String },

    /// Error during a forward pass
    #[error("Inference error: {0}")]
    Inference(String),

    /// Error reading or writing the metadata sidecar
    #[error("Metadata error: {0}")]
    Metadata(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for harvestcast operations
pub type Result<T> = std::result::Result<T, HarvestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_artifact_display() {
        let err = HarvestError::MissingModelArtifact(PathBuf::from("models/harvest_model.mpk"));
        let msg = format!("{}", err);
        assert!(msg.contains("harvest_model.mpk"));
        assert!(msg.contains("harvestcast train"));
    }

    #[test]
    fn test_invalid_feature_display() {
        let err = HarvestError::InvalidFeature {
            field: "temperature".to_string(),
            value: "abc".to_string(),
        };
        assert_eq!(
            format!("{}", err),
            "Invalid value 'abc' for field 'temperature': expected a number"
        );
    }
}
