//! Backend selection
//!
//! The demo runs everywhere, so everything is pinned to the portable
//! `ndarray` CPU backend. Training wraps it in `Autodiff`.

use burn::backend::ndarray::NdArrayDevice;
use burn::backend::{Autodiff, NdArray};

/// Backend used for inference
pub type InferenceBackend = NdArray;

/// Autodiff backend used for training
pub type TrainingBackend = Autodiff<NdArray>;

/// Get the default device
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}

/// Get a human-readable name for the current backend
pub fn backend_name() -> &'static str {
    "NdArray (CPU)"
}
