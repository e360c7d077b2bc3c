//! Inference
//!
//! Prediction utilities: image preprocessing, the predictor itself, and
//! the bucketing of predicted harvest days into maturity stages.

pub mod predictor;

use serde::{Deserialize, Serialize};

/// Ordered maturity buckets for a predicted harvest-day count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaturityStage {
    Early,
    Mid,
    Mature,
}

impl MaturityStage {
    /// Bucket a day count: `days <= 60` is Early, `days <= 120` is Mid,
    /// anything above is Mature
    pub fn from_days(days: i64) -> Self {
        if days <= 60 {
            MaturityStage::Early
        } else if days <= 120 {
            MaturityStage::Mid
        } else {
            MaturityStage::Mature
        }
    }
}

impl std::fmt::Display for MaturityStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaturityStage::Early => write!(f, "Early"),
            MaturityStage::Mid => write!(f, "Mid"),
            MaturityStage::Mature => write!(f, "Mature"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maturity_stage_boundaries() {
        assert_eq!(MaturityStage::from_days(60), MaturityStage::Early);
        assert_eq!(MaturityStage::from_days(61), MaturityStage::Mid);
        assert_eq!(MaturityStage::from_days(120), MaturityStage::Mid);
        assert_eq!(MaturityStage::from_days(121), MaturityStage::Mature);
    }

    #[test]
    fn test_maturity_stage_extremes() {
        assert_eq!(MaturityStage::from_days(-5), MaturityStage::Early);
        assert_eq!(MaturityStage::from_days(0), MaturityStage::Early);
        assert_eq!(MaturityStage::from_days(10_000), MaturityStage::Mature);
    }

    #[test]
    fn test_maturity_stage_serializes_as_label() {
        let json = serde_json::to_string(&MaturityStage::Mid).unwrap();
        assert_eq!(json, "\"Mid\"");
    }
}
