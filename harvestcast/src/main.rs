//! Harvestcast CLI
//!
//! Offline entry points: `train` fits the model on synthetic data and
//! persists the artifact, `predict` runs a single inference on a local
//! image without going through the HTTP service.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use harvestcast::backend::{backend_name, default_device, InferenceBackend, TrainingBackend};
use harvestcast::features::CropVocabulary;
use harvestcast::inference::predictor::Predictor;
use harvestcast::model::metadata::ModelMetadata;
use harvestcast::training::run_training;
use harvestcast::METADATA_FILE;

/// Harvest date prediction from crop conditions and field images
#[derive(Parser, Debug)]
#[command(name = "harvestcast")]
#[command(version = "0.1.0")]
#[command(about = "Harvest date prediction with Burn", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, default_value = "false")]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Train the model on synthetic data and save the artifact
    Train {
        /// Number of synthetic samples to generate
        #[arg(long, default_value = "100")]
        samples: usize,

        /// Number of training epochs
        #[arg(short, long, default_value = "5")]
        epochs: usize,

        /// Batch size for training
        #[arg(short, long, default_value = "8")]
        batch_size: usize,

        /// Learning rate
        #[arg(short, long, default_value = "0.001")]
        learning_rate: f64,

        /// Output directory for the model artifact
        #[arg(short, long, default_value = "models")]
        output_dir: PathBuf,

        /// Random seed for reproducibility
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Run a single prediction on a local image
    Predict {
        /// Directory containing the trained model artifact
        #[arg(short, long, default_value = "models")]
        model_dir: PathBuf,

        /// Path to the input image
        #[arg(short, long)]
        image: PathBuf,

        /// Crop type
        #[arg(long, default_value = "wheat")]
        crop_type: String,

        /// Average temperature in degrees Celsius
        #[arg(long, default_value = "25")]
        temperature: f32,

        /// Rainfall in millimeters
        #[arg(long, default_value = "100")]
        rainfall: f32,

        /// Soil pH
        #[arg(long, default_value = "6.5")]
        soil_ph: f32,

        /// Fertilizer used in kilograms per hectare
        #[arg(long, default_value = "50")]
        fertilizer_used: f32,

        /// Previous yield in tons per hectare
        #[arg(long, default_value = "2")]
        previous_yield: f32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let _ = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .compact()
        .try_init();

    println!("{}", "harvestcast".green().bold());
    println!("  Backend: {}", backend_name());
    println!();

    match cli.command {
        Commands::Train {
            samples,
            epochs,
            batch_size,
            learning_rate,
            output_dir,
            seed,
        } => {
            run_training::<TrainingBackend>(
                samples,
                epochs,
                batch_size,
                learning_rate,
                seed,
                &output_dir,
            )?;
        }

        Commands::Predict {
            model_dir,
            image,
            crop_type,
            temperature,
            rainfall,
            soil_ph,
            fertilizer_used,
            previous_yield,
        } => {
            let device = default_device();
            let predictor = Predictor::<InferenceBackend>::from_artifact(&model_dir, device)?;

            let metadata = ModelMetadata::load(&model_dir.join(METADATA_FILE))?;
            let mut vocabulary = CropVocabulary::new(&metadata.crop_types);
            let crop_code = vocabulary.encode_or_insert(&crop_type) as f32;

            let bytes = std::fs::read(&image)
                .with_context(|| format!("failed to read image {:?}", image))?;
            let pixels = predictor.preprocess_image_bytes(&bytes)?;

            let prediction = predictor.predict(
                [
                    crop_code,
                    temperature,
                    rainfall,
                    soil_ph,
                    fertilizer_used,
                    previous_yield,
                ],
                pixels,
            )?;

            println!("{}", "Prediction".cyan().bold());
            println!("  Crop: {}", crop_type);
            println!("  Harvest days: {}", prediction.harvest_days);
            println!("  Maturity stage: {}", prediction.maturity_stage);
            println!("  Inference time: {:.2} ms", prediction.inference_time_ms);
        }
    }

    Ok(())
}
