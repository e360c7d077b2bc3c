//! Feature encoding
//!
//! The crop vocabulary maps crop-type strings to integer codes, and the
//! feature scaler standardizes the numeric input columns with statistics
//! computed once at training time.

use serde::{Deserialize, Serialize};

use crate::NUM_FEATURES;

/// Mapping from crop-type strings to integer codes.
///
/// Codes are assigned append-only: a crop keeps its code for the lifetime
/// of the vocabulary, and unseen crops receive the next free code. Lookups
/// are linear, which is fine at vocabulary sizes of a few dozen entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CropVocabulary {
    crops: Vec<String>,
}

impl CropVocabulary {
    /// Create a vocabulary from an ordered list of crop names
    pub fn new<S: AsRef<str>>(crops: &[S]) -> Self {
        Self {
            crops: crops.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    /// Look up the code of a crop, if present
    pub fn code_of(&self, crop: &str) -> Option<usize> {
        self.crops.iter().position(|c| c == crop)
    }

    /// Look up the code of a crop, appending it if unseen.
    ///
    /// Existing codes are never reassigned.
    pub fn encode_or_insert(&mut self, crop: &str) -> usize {
        match self.code_of(crop) {
            Some(code) => code,
            None => {
                self.crops.push(crop.to_string());
                self.crops.len() - 1
            }
        }
    }

    /// All known crop names, in code order
    pub fn crops(&self) -> &[String] {
        &self.crops
    }

    /// Number of known crop types
    pub fn len(&self) -> usize {
        self.crops.len()
    }

    /// Whether the vocabulary is empty
    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

/// Standardization statistics for the numeric feature columns.
///
/// Computed by the trainer over its full training matrix and persisted in
/// the metadata sidecar, then applied unchanged to every inference request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureScaler {
    pub means: Vec<f32>,
    pub stds: Vec<f32>,
}

/// Columns with a standard deviation below this are treated as constant
const MIN_STD: f32 = 1e-6;

impl FeatureScaler {
    /// Fit per-column mean and standard deviation over a feature matrix.
    ///
    /// Constant columns get a std of 1.0 so the transform stays finite.
    pub fn fit(rows: &[[f32; NUM_FEATURES]]) -> Self {
        let n = rows.len().max(1) as f32;

        let mut means = vec![0.0f32; NUM_FEATURES];
        for row in rows {
            for (m, x) in means.iter_mut().zip(row.iter()) {
                *m += x;
            }
        }
        for m in means.iter_mut() {
            *m /= n;
        }

        let mut stds = vec![0.0f32; NUM_FEATURES];
        for row in rows {
            for (s, (x, m)) in stds.iter_mut().zip(row.iter().zip(means.iter())) {
                let d = x - m;
                *s += d * d;
            }
        }
        for s in stds.iter_mut() {
            *s = (*s / n).sqrt();
            if *s < MIN_STD {
                *s = 1.0;
            }
        }

        Self { means, stds }
    }

    /// Identity transform (zero mean, unit std for every column)
    pub fn identity() -> Self {
        Self {
            means: vec![0.0; NUM_FEATURES],
            stds: vec![1.0; NUM_FEATURES],
        }
    }

    /// Standardize a single feature vector
    pub fn transform(&self, features: [f32; NUM_FEATURES]) -> [f32; NUM_FEATURES] {
        let mut out = features;
        for (i, x) in out.iter_mut().enumerate() {
            *x = (*x - self.means[i]) / self.stds[i];
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_vocabulary_codes() {
        let vocab = CropVocabulary::new(&crate::DEFAULT_CROPS);
        assert_eq!(vocab.code_of("wheat"), Some(0));
        assert_eq!(vocab.code_of("rice"), Some(1));
        assert_eq!(vocab.code_of("maize"), Some(2));
        assert_eq!(vocab.code_of("tomato"), Some(3));
        assert_eq!(vocab.code_of("barley"), None);
    }

    #[test]
    fn test_unseen_crop_appended_without_reassignment() {
        let mut vocab = CropVocabulary::new(&crate::DEFAULT_CROPS);
        let code = vocab.encode_or_insert("barley");
        assert_eq!(code, 4);

        // Existing codes must survive the insertion
        assert_eq!(vocab.code_of("wheat"), Some(0));
        assert_eq!(vocab.code_of("tomato"), Some(3));

        // Encoding the same crop again is stable
        assert_eq!(vocab.encode_or_insert("barley"), 4);
        assert_eq!(vocab.len(), 5);
    }

    #[test]
    fn test_scaler_fit_and_transform() {
        let rows = [
            [0.0, 2.0, 0.0, 0.0, 0.0, 0.0],
            [2.0, 4.0, 0.0, 0.0, 0.0, 0.0],
        ];
        let scaler = FeatureScaler::fit(&rows);

        assert!((scaler.means[0] - 1.0).abs() < 1e-6);
        assert!((scaler.means[1] - 3.0).abs() < 1e-6);
        assert!((scaler.stds[0] - 1.0).abs() < 1e-6);

        let out = scaler.transform([2.0, 4.0, 0.0, 0.0, 0.0, 0.0]);
        assert!((out[0] - 1.0).abs() < 1e-6);
        assert!((out[1] - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_scaler_constant_column_guard() {
        let rows = [[5.0, 1.0, 1.0, 1.0, 1.0, 1.0]; 3];
        let scaler = FeatureScaler::fit(&rows);

        // Constant columns must not divide by zero
        let out = scaler.transform([5.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        for x in out {
            assert!(x.is_finite());
            assert!(x.abs() < 1e-6);
        }
    }

    #[test]
    fn test_identity_scaler_is_noop() {
        let scaler = FeatureScaler::identity();
        let features = [3.0, 25.0, 100.0, 6.5, 50.0, 2.0];
        assert_eq!(scaler.transform(features), features);
    }
}
