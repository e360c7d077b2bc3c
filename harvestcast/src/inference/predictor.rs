//! Predictor
//!
//! Loads the trained artifact once and runs single-sample forward passes.
//! Preprocessing follows the training pipeline: images are resized to the
//! model's input size, converted to RGB, scaled to [0, 1] in CHW layout,
//! and features are standardized with the persisted training statistics.

use std::path::Path;
use std::time::Instant;

use burn::module::Module;
use burn::record::CompactRecorder;
use burn::tensor::{backend::Backend, Tensor, TensorData};
use image::{imageops::FilterType, DynamicImage};
use serde::{Deserialize, Serialize};

use crate::error::{HarvestError, Result};
use crate::features::FeatureScaler;
use crate::inference::MaturityStage;
use crate::model::metadata::ModelMetadata;
use crate::model::net::{HarvestNet, HarvestNetConfig};
use crate::{METADATA_FILE, MODEL_FILE, MODEL_FILE_STEM, NUM_FEATURES};

/// Result of a single prediction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HarvestPrediction {
    /// Predicted days until harvest (model output rounded to an integer)
    pub harvest_days: i64,

    /// Maturity bucket for the predicted day count
    pub maturity_stage: MaturityStage,

    /// Inference time in milliseconds
    pub inference_time_ms: f64,
}

/// Predictor holding the loaded model and preprocessing parameters
pub struct Predictor<B: Backend> {
    model: HarvestNet<B>,
    scaler: FeatureScaler,
    image_size: u32,
    device: B::Device,
}

impl<B: Backend> Predictor<B> {
    /// Load the model artifact and metadata sidecar from a directory.
    ///
    /// Fails with [`HarvestError::MissingModelArtifact`] when the artifact
    /// is absent, so callers can fail fast at startup.
    pub fn from_artifact(model_dir: &Path, device: B::Device) -> Result<Self> {
        let artifact = model_dir.join(MODEL_FILE);
        if !artifact.exists() {
            return Err(HarvestError::MissingModelArtifact(artifact));
        }

        let metadata = ModelMetadata::load(&model_dir.join(METADATA_FILE))?;
        let config = HarvestNetConfig::new()
            .with_num_features(metadata.num_features)
            .with_image_size(metadata.image_size);

        let model = config
            .init::<B>(&device)
            .load_file(model_dir.join(MODEL_FILE_STEM), &CompactRecorder::new(), &device)
            .map_err(|e| HarvestError::ModelLoad(e.to_string()))?;

        Ok(Self {
            model,
            scaler: metadata.scaler(),
            image_size: metadata.image_size as u32,
            device,
        })
    }

    /// Build a predictor from an already constructed model (used in tests
    /// and benchmarks where no artifact exists)
    pub fn new(
        model: HarvestNet<B>,
        scaler: FeatureScaler,
        image_size: u32,
        device: B::Device,
    ) -> Self {
        Self {
            model,
            scaler,
            image_size,
            device,
        }
    }

    /// Target image size (square)
    pub fn image_size(&self) -> u32 {
        self.image_size
    }

    /// Decode raw image bytes and preprocess them for the model
    pub fn preprocess_image_bytes(&self, bytes: &[u8]) -> Result<Vec<f32>> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| HarvestError::ImageDecode(e.to_string()))?;
        Ok(self.preprocess_image(&img))
    }

    /// Resize to the model input size and convert to a flat CHW vector
    /// with pixel values scaled to [0, 1]
    pub fn preprocess_image(&self, img: &DynamicImage) -> Vec<f32> {
        let rgb = img
            .resize_exact(self.image_size, self.image_size, FilterType::Triangle)
            .to_rgb8();

        let (width, height) = (self.image_size as usize, self.image_size as usize);
        let mut pixels = vec![0.0f32; 3 * height * width];

        for y in 0..height {
            for x in 0..width {
                let pixel = rgb.get_pixel(x as u32, y as u32);
                pixels[y * width + x] = pixel[0] as f32 / 255.0;
                pixels[height * width + y * width + x] = pixel[1] as f32 / 255.0;
                pixels[2 * height * width + y * width + x] = pixel[2] as f32 / 255.0;
            }
        }

        pixels
    }

    /// Run a single forward pass over a feature vector and a preprocessed
    /// pixel grid
    pub fn predict(
        &self,
        features: [f32; NUM_FEATURES],
        pixels: Vec<f32>,
    ) -> Result<HarvestPrediction> {
        let start = Instant::now();

        let size = self.image_size as usize;
        let expected = 3 * size * size;
        if pixels.len() != expected {
            return Err(HarvestError::Inference(format!(
                "expected {} pixel values, got {}",
                expected,
                pixels.len()
            )));
        }

        let scaled = self.scaler.transform(features);
        let features_tensor = Tensor::<B, 2>::from_floats(
            TensorData::new(scaled.to_vec(), [1, NUM_FEATURES]),
            &self.device,
        );
        let image_tensor = Tensor::<B, 4>::from_floats(
            TensorData::new(pixels, [1, 3, size, size]),
            &self.device,
        );

        let output = self.model.forward(features_tensor, image_tensor);
        let values = output
            .into_data()
            .to_vec::<f32>()
            .map_err(|e| HarvestError::Inference(format!("failed to read model output: {e:?}")))?;
        let raw = values
            .first()
            .copied()
            .ok_or_else(|| HarvestError::Inference("model produced no output".to_string()))?;

        let harvest_days = raw.round() as i64;

        Ok(HarvestPrediction {
            harvest_days,
            maturity_stage: MaturityStage::from_days(harvest_days),
            inference_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::InferenceBackend;

    fn test_predictor(image_size: usize) -> Predictor<InferenceBackend> {
        let device = Default::default();
        let model = HarvestNetConfig::new()
            .with_image_size(image_size)
            .init::<InferenceBackend>(&device);
        Predictor::new(model, FeatureScaler::identity(), image_size as u32, device)
    }

    #[test]
    fn test_preprocess_resizes_and_flattens() {
        let predictor = test_predictor(32);
        let img = DynamicImage::new_rgb8(100, 80);
        let pixels = predictor.preprocess_image(&img);
        assert_eq!(pixels.len(), 3 * 32 * 32);
        assert!(pixels.iter().all(|&p| (0.0..=1.0).contains(&p)));
    }

    #[test]
    fn test_predict_stage_matches_days() {
        let predictor = test_predictor(32);
        let pixels = vec![0.5f32; 3 * 32 * 32];
        let prediction = predictor
            .predict([0.0, 25.0, 100.0, 6.5, 50.0, 2.0], pixels)
            .unwrap();

        assert_eq!(
            prediction.maturity_stage,
            MaturityStage::from_days(prediction.harvest_days)
        );
    }

    #[test]
    fn test_predict_rejects_wrong_pixel_count() {
        let predictor = test_predictor(32);
        let result = predictor.predict([0.0; NUM_FEATURES], vec![0.0; 10]);
        assert!(matches!(result, Err(HarvestError::Inference(_))));
    }

    #[test]
    fn test_predict_rejects_undecodable_bytes() {
        let predictor = test_predictor(32);
        let result = predictor.preprocess_image_bytes(b"not an image");
        assert!(matches!(result, Err(HarvestError::ImageDecode(_))));
    }
}
