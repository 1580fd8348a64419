use serde::{Deserialize, Serialize};

const WEIGHT_TOLERANCE: f64 = 1e-6;

/// Blend of the match score terms. The three weights must sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skill_overlap: f64,
    pub interview: f64,
    pub ai_insight: f64,
}

impl MatchWeights {
    pub fn sum(&self) -> f64 {
        self.skill_overlap + self.interview + self.ai_insight
    }

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        validate_weights(
            "match",
            &[
                ("skill_overlap", self.skill_overlap),
                ("interview", self.interview),
                ("ai_insight", self.ai_insight),
            ],
        )
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skill_overlap: 0.6,
            interview: 0.25,
            ai_insight: 0.15,
        }
    }
}

/// Weights used by the performance composer for CV and interview scores.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompositeWeights {
    pub cv: f64,
    pub interview: f64,
}

impl CompositeWeights {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        validate_weights("composite", &[("cv", self.cv), ("interview", self.interview)])
    }
}

impl Default for CompositeWeights {
    fn default() -> Self {
        Self {
            cv: 0.4,
            interview: 0.6,
        }
    }
}

/// Threshold and page size applied when ranking recommendations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingPolicy {
    pub min_score: u8,
    pub limit: usize,
}

impl RankingPolicy {
    pub const DEFAULT_MIN_SCORE: u8 = 30;
    pub const DEFAULT_LIMIT: usize = 6;

    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        if self.min_score > 100 {
            return Err(ScoringConfigError::ThresholdOutOfRange(f64::from(
                self.min_score,
            )));
        }
        if self.limit == 0 {
            return Err(ScoringConfigError::ZeroLimit);
        }
        Ok(())
    }
}

impl Default for RankingPolicy {
    fn default() -> Self {
        Self {
            min_score: Self::DEFAULT_MIN_SCORE,
            limit: Self::DEFAULT_LIMIT,
        }
    }
}

/// Scoring knobs for matching, composition, and ranking.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ScoringConfig {
    pub match_weights: MatchWeights,
    pub composite_weights: CompositeWeights,
    pub ranking: RankingPolicy,
}

impl ScoringConfig {
    pub fn validate(&self) -> Result<(), ScoringConfigError> {
        self.match_weights.validate()?;
        self.composite_weights.validate()?;
        self.ranking.validate()
    }
}

/// Configuration defects detected when scoring settings are loaded.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringConfigError {
    #[error("{group} weight '{name}' must be a finite, non-negative number (got {value})")]
    InvalidWeight {
        group: &'static str,
        name: &'static str,
        value: f64,
    },
    #[error("{group} weights must sum to 1.0 (got {sum:.4})")]
    WeightSum { group: &'static str, sum: f64 },
    #[error("minimum score must be within 0..=100 (got {0})")]
    ThresholdOutOfRange(f64),
    #[error("recommendation limit must be at least 1")]
    ZeroLimit,
}

fn validate_weights(
    group: &'static str,
    weights: &[(&'static str, f64)],
) -> Result<(), ScoringConfigError> {
    for &(name, value) in weights {
        if !value.is_finite() || value < 0.0 {
            return Err(ScoringConfigError::InvalidWeight { group, name, value });
        }
    }

    let sum: f64 = weights.iter().map(|(_, value)| value).sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ScoringConfigError::WeightSum { group, sum });
    }

    Ok(())
}
