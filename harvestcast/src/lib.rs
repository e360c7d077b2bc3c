//! # Harvestcast
//!
//! A small harvest-date prediction system built with the Burn framework.
//! A two-branch regression network consumes crop-growth parameters together
//! with a field image and predicts the number of days until harvest.
//!
//! ## Modules
//!
//! - `dataset`: Synthetic training data and Burn batching
//! - `model`: Two-branch network architecture and the metadata sidecar
//! - `training`: Offline training loop that produces the model artifact
//! - `inference`: Predictor, image preprocessing, and maturity bucketing
//! - `features`: Crop vocabulary encoding and feature standardization

pub mod backend;
pub mod dataset;
pub mod error;
pub mod features;
pub mod inference;
pub mod model;
pub mod training;

// Re-export commonly used items for convenience
pub use dataset::{HarvestBatch, HarvestBatcher, HarvestSample, SyntheticHarvestDataset};
pub use error::{HarvestError, Result};
pub use features::{CropVocabulary, FeatureScaler};
pub use inference::predictor::{HarvestPrediction, Predictor};
pub use inference::MaturityStage;
pub use model::metadata::ModelMetadata;
pub use model::net::{HarvestNet, HarvestNetConfig};

/// Number of numeric input features (crop code + five growth parameters)
pub const NUM_FEATURES: usize = 6;

/// Input image size (width and height, square)
pub const IMAGE_SIZE: usize = 128;

/// Crop types known at training time, in code order
pub const DEFAULT_CROPS: [&str; 4] = ["wheat", "rice", "maize", "tomato"];

/// File stem of the model artifact (the recorder appends its own extension)
pub const MODEL_FILE_STEM: &str = "harvest_model";

/// File name of the persisted model artifact
pub const MODEL_FILE: &str = "harvest_model.mpk";

/// File name of the metadata sidecar stored next to the artifact
pub const METADATA_FILE: &str = "harvest_model.json";

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
