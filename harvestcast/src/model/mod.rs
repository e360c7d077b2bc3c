//! Model architecture and artifact metadata

pub mod metadata;
pub mod net;

pub use metadata::ModelMetadata;
pub use net::{HarvestNet, HarvestNetConfig};
