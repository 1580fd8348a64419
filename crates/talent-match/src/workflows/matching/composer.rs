use super::config::CompositeWeights;
use super::domain::{CompositeInputs, CompositeScore};
use crate::workflows::skills::AssessmentScore;

/// Blends CV and interview scores into one final score.
///
/// Only stages that are enabled for the job and produced a usable score take
/// part. The weighted sum is divided by the weight that actually took part, so
/// a job that skips one stage still yields a score on the full 0-100 scale.
#[derive(Debug, Clone)]
pub struct PerformanceComposer {
    weights: CompositeWeights,
}

impl PerformanceComposer {
    pub fn new(weights: CompositeWeights) -> Self {
        Self { weights }
    }

    pub fn compose(&self, inputs: &CompositeInputs) -> CompositeScore {
        let cv_score = inputs
            .cv_score
            .filter(|_| inputs.enable_cv_analysis)
            .and_then(|score| AssessmentScore::new(score).usable());
        let interview_score = inputs
            .interview_score
            .filter(|_| inputs.interview_enabled())
            .and_then(|score| AssessmentScore::new(score).usable());

        let mut weighted = 0.0;
        let mut weight = 0.0;
        for (score, stage_weight) in [
            (cv_score, self.weights.cv),
            (interview_score, self.weights.interview),
        ] {
            if let Some(score) = score {
                weighted += score * stage_weight;
                weight += stage_weight;
            }
        }

        let final_score = (weight > 0.0)
            .then(|| (weighted / weight).round().clamp(0.0, 100.0) as u8);

        CompositeScore {
            cv_score,
            interview_score,
            final_score,
        }
    }
}

impl Default for PerformanceComposer {
    fn default() -> Self {
        Self::new(CompositeWeights::default())
    }
}
