use serde::{Deserialize, Serialize};

use crate::workflows::skills::{Assessment, CandidateId, SkillLedger};

/// Skills an opportunity asks for, in the order the job lists them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequirement {
    #[serde(default)]
    pub skills: Vec<String>,
}

impl JobRequirement {
    pub fn new<I, S>(skills: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            skills: skills.into_iter().map(Into::into).collect(),
        }
    }
}

/// Readiness signal distilled from a candidate's mock interview history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InterviewReadiness {
    pub interview_count: u32,
    pub avg_overall_score: f64,
    pub readiness_score: f64,
}

impl InterviewReadiness {
    /// Derive readiness from the candidate's assessments. Only usable scores
    /// feed the average; every assessment counts as an interview.
    pub fn from_history(assessments: &[Assessment]) -> Self {
        let scores: Vec<f64> = assessments
            .iter()
            .filter_map(|assessment| assessment.overall_score.usable())
            .collect();

        let avg_overall_score = if scores.is_empty() {
            0.0
        } else {
            scores.iter().sum::<f64>() / scores.len() as f64
        };

        Self {
            interview_count: u32::try_from(assessments.len()).unwrap_or(u32::MAX),
            avg_overall_score,
            readiness_score: avg_overall_score.round(),
        }
    }
}

/// Aggregate of externally generated AI insight reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AiInsights {
    pub report_count: u32,
    pub ai_insight_score: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    #[serde(default)]
    pub interview_readiness: Option<InterviewReadiness>,
    #[serde(default)]
    pub ai_insights: Option<AiInsights>,
}

/// Read-only snapshot of everything matching needs about one candidate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub candidate_id: CandidateId,
    pub ledger: SkillLedger,
    pub assessment_count: usize,
    #[serde(default)]
    pub sub_scores: SubScores,
}

/// Terms blended into a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    SkillOverlap,
    InterviewReadiness,
    AiInsight,
}

/// One weighted term of a match score, kept for audits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub value: f64,
    pub weight: f64,
    pub contribution: f64,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub candidate_id: CandidateId,
    pub match_score: u8,
    pub matched_skills: Vec<String>,
    pub components: Vec<ScoreComponent>,
}

impl MatchResult {
    pub fn component(&self, factor: MatchFactor) -> Option<&ScoreComponent> {
        self.components
            .iter()
            .find(|component| component.factor == factor)
    }
}

/// Inputs for blending the optional evaluation stages of one candidate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeInputs {
    #[serde(default)]
    pub cv_score: Option<f64>,
    #[serde(default)]
    pub interview_score: Option<f64>,
    #[serde(default)]
    pub enable_cv_analysis: bool,
    #[serde(default)]
    pub interview_type: Option<String>,
}

impl CompositeInputs {
    pub fn interview_enabled(&self) -> bool {
        self.interview_type
            .as_deref()
            .map(str::trim)
            .is_some_and(|kind| !kind.is_empty() && !kind.eq_ignore_ascii_case("none"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CompositeScore {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cv_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interview_score: Option<f64>,
    /// `None` when no enabled stage produced a usable score.
    pub final_score: Option<u8>,
}

impl CompositeScore {
    pub fn is_available(&self) -> bool {
        self.final_score.is_some()
    }
}

/// Selects which score orders a recommendation list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RankKey {
    #[default]
    Match,
    Performance,
}

/// A scored candidate as presented to ranking and to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub candidate_id: CandidateId,
    pub match_score: u8,
    pub matched_skills: Vec<String>,
    pub assessment_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub final_score: Option<u8>,
    #[serde(default)]
    pub components: Vec<ScoreComponent>,
}

impl Recommendation {
    pub fn from_match(result: MatchResult, assessment_count: usize) -> Self {
        Self {
            candidate_id: result.candidate_id,
            match_score: result.match_score,
            matched_skills: result.matched_skills,
            assessment_count,
            final_score: None,
            components: result.components,
        }
    }

    pub fn with_composite(mut self, composite: CompositeScore) -> Self {
        self.final_score = composite.final_score;
        self
    }

    pub fn score_for(&self, key: RankKey) -> Option<u8> {
        match key {
            RankKey::Match => Some(self.match_score),
            RankKey::Performance => self.final_score,
        }
    }
}
