//! End-to-end trainer test: the persisted artifact must reload and accept
//! the predictor's expected input shapes.

use harvestcast::backend::{default_device, InferenceBackend, TrainingBackend};
use harvestcast::inference::predictor::Predictor;
use harvestcast::model::metadata::ModelMetadata;
use harvestcast::training::run_training;
use harvestcast::{IMAGE_SIZE, METADATA_FILE, MODEL_FILE, NUM_FEATURES};

fn train_into(dir: &std::path::Path, seed: u64) {
    // Tiny run: artifact validity is what matters, not model quality
    run_training::<TrainingBackend>(8, 1, 4, 1e-3, seed, dir).unwrap();
}

#[test]
fn trained_artifacts_reload_for_inference() {
    let dir_a = tempfile::tempdir().unwrap();
    let dir_b = tempfile::tempdir().unwrap();

    train_into(dir_a.path(), 42);
    train_into(dir_b.path(), 43);

    for dir in [dir_a.path(), dir_b.path()] {
        assert!(dir.join(MODEL_FILE).exists());
        assert!(dir.join(METADATA_FILE).exists());

        let metadata = ModelMetadata::load(&dir.join(METADATA_FILE)).unwrap();
        assert_eq!(metadata.num_features, NUM_FEATURES);
        assert_eq!(metadata.image_size, IMAGE_SIZE);
        assert_eq!(metadata.crop_types.len(), 4);

        let predictor =
            Predictor::<InferenceBackend>::from_artifact(dir, default_device()).unwrap();

        let pixels = vec![0.25f32; 3 * IMAGE_SIZE * IMAGE_SIZE];
        let prediction = predictor
            .predict([0.0, 25.0, 100.0, 6.5, 50.0, 2.0], pixels)
            .unwrap();

        // Output must be a finite integer day count with a consistent bucket
        assert_eq!(
            prediction.maturity_stage,
            harvestcast::MaturityStage::from_days(prediction.harvest_days)
        );
    }
}

#[test]
fn missing_artifact_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let result = Predictor::<InferenceBackend>::from_artifact(dir.path(), default_device());
    assert!(matches!(
        result,
        Err(harvestcast::HarvestError::MissingModelArtifact(_))
    ));
}
