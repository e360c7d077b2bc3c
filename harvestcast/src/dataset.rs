//! Synthetic training data and Burn batching
//!
//! The trainer has no real dataset; it generates random growth features,
//! random pixel grids, and random harvest-day targets. The batcher turns
//! items into the two input tensors plus a regression target, applying the
//! feature standardization that the predictor will also use.

use burn::data::dataloader::batcher::Batcher;
use burn::data::dataset::Dataset;
use burn::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::features::FeatureScaler;
use crate::NUM_FEATURES;

/// A single training sample
#[derive(Clone, Debug)]
pub struct HarvestSample {
    /// Numeric growth features
    pub features: [f32; NUM_FEATURES],
    /// Flattened CHW pixel grid [3 * H * W], values in [0, 1)
    pub image: Vec<f32>,
    /// Target harvest days
    pub target: f32,
}

/// Randomly generated dataset for the offline trainer
#[derive(Clone, Debug)]
pub struct SyntheticHarvestDataset {
    samples: Vec<HarvestSample>,
    image_size: usize,
}

impl SyntheticHarvestDataset {
    /// Generate `num_samples` random samples: features uniform in [0, 10),
    /// pixels uniform in [0, 1), integer targets uniform in [50, 150)
    pub fn generate(num_samples: usize, image_size: usize, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let pixels_per_image = 3 * image_size * image_size;

        let samples = (0..num_samples)
            .map(|_| {
                let features: [f32; NUM_FEATURES] =
                    std::array::from_fn(|_| rng.gen_range(0.0f32..10.0));
                let image = (0..pixels_per_image).map(|_| rng.gen::<f32>()).collect();
                let target = rng.gen_range(50..150) as f32;

                HarvestSample {
                    features,
                    image,
                    target,
                }
            })
            .collect();

        Self {
            samples,
            image_size,
        }
    }

    /// The raw feature matrix, for fitting the scaler
    pub fn feature_rows(&self) -> Vec<[f32; NUM_FEATURES]> {
        self.samples.iter().map(|s| s.features).collect()
    }

    /// Target image size
    pub fn image_size(&self) -> usize {
        self.image_size
    }
}

impl Dataset<HarvestSample> for SyntheticHarvestDataset {
    fn get(&self, index: usize) -> Option<HarvestSample> {
        self.samples.get(index).cloned()
    }

    fn len(&self) -> usize {
        self.samples.len()
    }
}

/// A batch of harvest samples ready for the network
#[derive(Clone, Debug)]
pub struct HarvestBatch<B: Backend> {
    /// Standardized features with shape [batch_size, num_features]
    pub features: Tensor<B, 2>,
    /// Images with shape [batch_size, 3, height, width]
    pub images: Tensor<B, 4>,
    /// Regression targets with shape [batch_size, 1]
    pub targets: Tensor<B, 2>,
}

/// Batcher that assembles the two input tensors and the target tensor
#[derive(Clone, Debug)]
pub struct HarvestBatcher<B: Backend> {
    device: B::Device,
    scaler: FeatureScaler,
    image_size: usize,
}

impl<B: Backend> HarvestBatcher<B> {
    /// Create a batcher for the given device and scaler
    pub fn new(device: B::Device, scaler: FeatureScaler, image_size: usize) -> Self {
        Self {
            device,
            scaler,
            image_size,
        }
    }
}

impl<B: Backend> Batcher<HarvestSample, HarvestBatch<B>> for HarvestBatcher<B> {
    fn batch(&self, items: Vec<HarvestSample>) -> HarvestBatch<B> {
        let batch_size = items.len();
        let (height, width) = (self.image_size, self.image_size);

        let features_data: Vec<f32> = items
            .iter()
            .flat_map(|item| self.scaler.transform(item.features))
            .collect();
        let features = Tensor::<B, 2>::from_floats(
            TensorData::new(features_data, [batch_size, NUM_FEATURES]),
            &self.device,
        );

        let images_data: Vec<f32> = items.iter().flat_map(|item| item.image.clone()).collect();
        let images = Tensor::<B, 4>::from_floats(
            TensorData::new(images_data, [batch_size, 3, height, width]),
            &self.device,
        );

        let targets_data: Vec<f32> = items.iter().map(|item| item.target).collect();
        let targets = Tensor::<B, 2>::from_floats(
            TensorData::new(targets_data, [batch_size, 1]),
            &self.device,
        );

        HarvestBatch {
            features,
            images,
            targets,
        }
    }
}
