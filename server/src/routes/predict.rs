//! Prediction endpoint
//!
//! `POST /predict` accepts a multipart form with optional crop-growth
//! fields and a required image file, runs one forward pass through the
//! loaded model, and returns the predicted harvest date bucket.

use std::path::Path;

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::{debug, warn};
use uuid::Uuid;

use harvestcast::inference::MaturityStage;
use harvestcast::NUM_FEATURES;

use crate::error::ApiError;
use crate::state::SharedState;

/// Successful prediction response
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub crop: String,
    pub harvest_days: i64,
    pub maturity_stage: MaturityStage,
}

/// Parsed multipart form with the spec'd field defaults
struct PredictForm {
    crop_type: String,
    temperature: f32,
    rainfall: f32,
    soil_ph: f32,
    fertilizer_used: f32,
    previous_yield: f32,
    image: Option<(String, Bytes)>,
}

impl Default for PredictForm {
    fn default() -> Self {
        Self {
            crop_type: "wheat".to_string(),
            temperature: 25.0,
            rainfall: 100.0,
            soil_ph: 6.5,
            fertilizer_used: 50.0,
            previous_yield: 2.0,
            image: None,
        }
    }
}

/// Parse a numeric form field, rejecting non-numbers as a client error
fn parse_numeric(field: &str, value: &str) -> Result<f32, ApiError> {
    value.trim().parse::<f32>().map_err(|_| ApiError::InvalidField {
        field: field.to_string(),
        value: value.to_string(),
    })
}

async fn read_form(mut multipart: Multipart) -> Result<PredictForm, ApiError> {
    let mut form = PredictForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::Malformed(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "image" {
            let filename = field.file_name().unwrap_or("upload.bin").to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::Malformed(e.to_string()))?;
            form.image = Some((filename, bytes));
            continue;
        }

        let text = field
            .text()
            .await
            .map_err(|e| ApiError::Malformed(e.to_string()))?;

        match name.as_str() {
            "crop_type" => form.crop_type = text,
            "temperature" => form.temperature = parse_numeric(&name, &text)?,
            "rainfall" => form.rainfall = parse_numeric(&name, &text)?,
            "soil_ph" => form.soil_ph = parse_numeric(&name, &text)?,
            "fertilizer_used" => form.fertilizer_used = parse_numeric(&name, &text)?,
            "previous_yield" => form.previous_yield = parse_numeric(&name, &text)?,
            _ => debug!(field = %name, "ignoring unknown form field"),
        }
    }

    Ok(form)
}

/// Persist the uploaded bytes under a unique name so concurrent requests
/// never overwrite each other
async fn save_upload(state: &SharedState, filename: &str, bytes: &Bytes) -> Result<(), ApiError> {
    let safe_name = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.bin");
    let unique_name = format!("{}_{}", Uuid::new_v4(), safe_name);
    let path = state.config.uploads_dir.join(unique_name);

    tokio::fs::write(&path, bytes)
        .await
        .map_err(|e| ApiError::Internal(format!("failed to persist upload: {}", e)))?;

    debug!(?path, "upload saved");
    Ok(())
}

/// POST /predict - Predict the harvest date bucket for a crop
pub async fn predict(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Json<PredictResponse>, ApiError> {
    let form = read_form(multipart).await?;

    let (filename, bytes) = form.image.ok_or(ApiError::MissingImage)?;
    save_upload(&state, &filename, &bytes).await?;

    // Unseen crop types grow the vocabulary; codes are append-only stable
    let crop_code = {
        let mut vocabulary = state.vocabulary.write().await;
        if vocabulary.code_of(&form.crop_type).is_none() {
            warn!(crop = %form.crop_type, "crop type unseen at training time; extending vocabulary");
        }
        vocabulary.encode_or_insert(&form.crop_type) as f32
    };

    let features: [f32; NUM_FEATURES] = [
        crop_code,
        form.temperature,
        form.rainfall,
        form.soil_ph,
        form.fertilizer_used,
        form.previous_yield,
    ];

    let pixels = state.predictor.preprocess_image_bytes(&bytes)?;
    let prediction = state.predictor.predict(features, pixels)?;

    debug!(
        crop = %form.crop_type,
        days = prediction.harvest_days,
        time_ms = prediction.inference_time_ms,
        "prediction served"
    );

    Ok(Json(PredictResponse {
        crop: form.crop_type,
        harvest_days: prediction.harvest_days,
        maturity_stage: prediction.maturity_stage,
    }))
}
