//! Offline training
//!
//! One-shot training loop that fits the two-branch network on synthetic
//! data and persists the artifact plus its metadata sidecar. This is a
//! utility, not a service: it runs once and exits.

use std::path::{Path, PathBuf};

use anyhow::Result;
use burn::{
    data::dataloader::{DataLoader, DataLoaderBuilder},
    module::Module,
    nn::loss::{MseLoss, Reduction},
    optim::{AdamConfig, GradientsParams, Optimizer},
    record::CompactRecorder,
    tensor::{backend::AutodiffBackend, ElementConversion},
};
use colored::Colorize;
use tracing::info;

use crate::dataset::{HarvestBatcher, SyntheticHarvestDataset};
use crate::features::FeatureScaler;
use crate::model::metadata::ModelMetadata;
use crate::model::net::HarvestNetConfig;
use crate::{IMAGE_SIZE, METADATA_FILE, MODEL_FILE_STEM};

/// Train the harvest model on synthetic data and persist the artifact.
///
/// Returns the path of the saved model artifact (without the recorder's
/// file extension).
pub fn run_training<B: AutodiffBackend>(
    num_samples: usize,
    epochs: usize,
    batch_size: usize,
    learning_rate: f64,
    seed: u64,
    output_dir: &Path,
) -> Result<PathBuf> {
    println!("{}", "Initializing Training...".green().bold());

    let device = B::Device::default();
    B::seed(seed);

    println!("{}", "Generating Synthetic Dataset...".cyan());
    let dataset = SyntheticHarvestDataset::generate(num_samples, IMAGE_SIZE, seed);
    let scaler = FeatureScaler::fit(&dataset.feature_rows());

    println!("{}", "Creating Model...".cyan());
    let model_config = HarvestNetConfig::new();
    let mut model = model_config.init::<B>(&device);

    let batcher = HarvestBatcher::<B>::new(device.clone(), scaler.clone(), IMAGE_SIZE);
    let dataloader = DataLoaderBuilder::new(batcher)
        .batch_size(batch_size)
        .shuffle(seed)
        .num_workers(1)
        .build(dataset);

    let mut optim = AdamConfig::new().init();
    let loss_fn = MseLoss::new();

    println!();
    println!("{}", "Training Configuration:".cyan().bold());
    println!("  Samples: {}", num_samples);
    println!("  Epochs: {}", epochs);
    println!("  Batch size: {}", batch_size);
    println!("  Learning rate: {}", learning_rate);
    println!("  Device: {:?}", device);
    println!();

    for epoch in 1..=epochs {
        let mut epoch_loss = 0.0f32;
        let mut num_batches = 0usize;

        for batch in dataloader.iter() {
            let output = model.forward(batch.features, batch.images);
            let loss = loss_fn.forward(output, batch.targets, Reduction::Mean);

            epoch_loss += loss.clone().into_scalar().elem::<f32>();
            num_batches += 1;

            let grads = GradientsParams::from_grads(loss.backward(), &model);
            model = optim.step(learning_rate, model, grads);
        }

        let avg_loss = epoch_loss / num_batches.max(1) as f32;
        info!(epoch, avg_loss, "epoch complete");
        println!("  Epoch {}/{} - loss: {:.2}", epoch, epochs, avg_loss);
    }

    println!();
    println!("{}", "Saving Model...".cyan());
    std::fs::create_dir_all(output_dir)?;

    let artifact_path = output_dir.join(MODEL_FILE_STEM);
    model
        .save_file(artifact_path.clone(), &CompactRecorder::new())
        .map_err(|e| anyhow::anyhow!("Failed to save model: {}", e))?;

    let metadata = ModelMetadata::new(&scaler);
    metadata.save(&output_dir.join(METADATA_FILE))?;

    println!("  Saved to: {:?}", artifact_path);
    println!();
    println!("{}", "Training Complete!".green().bold());
    println!("  Serve it with: `harvestcast-server --model-dir {:?}`", output_dir);

    Ok(artifact_path)
}
