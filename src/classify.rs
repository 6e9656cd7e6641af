//! Inference Boundary
//!
//! The image classifier itself is an external collaborator: an opaque
//! function from image bytes to a probability per known class, in no
//! particular order. This module owns the boundary types and the ranking
//! step; the pipeline never assumes the model pre-sorts its output.

use serde::{Deserialize, Serialize};

use crate::error::AdvisorError;

/// One class score from the external model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    /// Disease class name, also the matching keyword
    pub label: String,
    /// Probability in [0, 1]
    pub probability: f32,
}

/// Opaque image -> ranking boundary. Implementations wrap whatever model
/// runtime the deployment uses.
pub trait ImageClassifier: Send + Sync {
    fn classify(&self, image: &[u8]) -> Result<Vec<Prediction>, AdvisorError>;
}

/// Sort predictions descending by probability (stable, total order over f32)
pub fn rank_predictions(mut predictions: Vec<Prediction>) -> Vec<Prediction> {
    predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
    predictions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pred(label: &str, probability: f32) -> Prediction {
        Prediction {
            label: label.to_string(),
            probability,
        }
    }

    #[test]
    fn test_rank_sorts_descending() {
        let ranked = rank_predictions(vec![
            pred("정상", 0.1),
            pred("탄저병", 0.7),
            pred("역병", 0.2),
        ]);

        let labels: Vec<&str> = ranked.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, ["탄저병", "역병", "정상"]);
    }

    #[test]
    fn test_rank_does_not_assume_presorted() {
        let ranked = rank_predictions(vec![pred("a", 0.9), pred("b", 0.95)]);

        assert_eq!(ranked[0].label, "b");
    }

    #[test]
    fn test_rank_empty_is_empty() {
        assert!(rank_predictions(Vec::new()).is_empty());
    }
}
