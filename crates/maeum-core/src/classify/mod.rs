//! Emotion-classification boundary.

pub mod huggingface;

use async_trait::async_trait;
use serde::Deserialize;

use crate::error::CounselError;

/// One (label, confidence) pair from the classifier's label space.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct LabelScore {
    pub label: String,
    /// Softmax probability in `[0, 1]`.
    pub score: f32,
}

/// Boundary to a hosted text-classification model.
///
/// Implementations return the model's full ranked label space for the
/// input text (softmax semantics: scores sum to ~1.0). Transport and
/// malformed-response failures map to
/// [`CounselError::ClassificationUnavailable`].
#[async_trait]
pub trait EmotionClassifier: Send + Sync {
    async fn classify(&self, text: &str) -> Result<Vec<LabelScore>, CounselError>;
}

/// Highest-confidence pair of a ranked score set.
///
/// Ties keep the earliest pair; an empty set yields `None` (the pipeline
/// treats that as a malformed response).
pub fn best(scores: &[LabelScore]) -> Option<&LabelScore> {
    scores
        .iter()
        .reduce(|best, score| if score.score > best.score { score } else { best })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(label: &str, score: f32) -> LabelScore {
        LabelScore {
            label: label.to_owned(),
            score,
        }
    }

    #[test]
    fn best_picks_highest_score() {
        let scores = vec![score("sad", 0.42), score("happy", 0.51), score("angry", 0.07)];
        assert_eq!(best(&scores).unwrap().label, "happy");
    }

    #[test]
    fn best_keeps_earliest_on_ties() {
        let scores = vec![score("sad", 0.5), score("hurt", 0.5)];
        assert_eq!(best(&scores).unwrap().label, "sad");
    }

    #[test]
    fn best_of_empty_is_none() {
        assert!(best(&[]).is_none());
    }
}
