use std::collections::HashSet;

use super::config::MatchWeights;
use super::domain::{JobRequirement, MatchFactor, MatchResult, ScoreComponent, SubScores};
use crate::workflows::skills::extractor::dedupe_labels;
use crate::workflows::skills::{canonical_skill_name, CandidateId, SkillLedger};

/// Stateless scorer that blends skill overlap with readiness signals.
#[derive(Debug, Clone)]
pub struct MatchScorer {
    weights: MatchWeights,
}

impl MatchScorer {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    pub fn score(
        &self,
        candidate_id: &CandidateId,
        ledger: &SkillLedger,
        job: &JobRequirement,
        sub_scores: &SubScores,
    ) -> MatchResult {
        self.score_skills(candidate_id, &ledger.canonical_names(), job, sub_scores)
    }

    /// Score against a set of canonical candidate skill names.
    pub fn score_skills(
        &self,
        candidate_id: &CandidateId,
        candidate_skills: &HashSet<String>,
        job: &JobRequirement,
        sub_scores: &SubScores,
    ) -> MatchResult {
        let requirements = dedupe_labels(job.skills.iter().map(String::as_str));
        let matched_skills: Vec<String> = requirements
            .iter()
            .filter(|skill| candidate_skills.contains(&canonical_skill_name(skill)))
            .cloned()
            .collect();

        let overlap = matched_skills.len() as f64 / requirements.len().max(1) as f64 * 100.0;
        let mut components = vec![self.component(
            MatchFactor::SkillOverlap,
            overlap,
            self.weights.skill_overlap,
            format!(
                "{} of {} required skills present",
                matched_skills.len(),
                requirements.len()
            ),
        )];

        let (readiness, readiness_notes) = match sub_scores.interview_readiness {
            Some(readiness) if readiness.interview_count > 0 => (
                bounded(readiness.readiness_score),
                format!(
                    "readiness across {} interview(s)",
                    readiness.interview_count
                ),
            ),
            _ => (0.0, "no interviews on record".to_string()),
        };
        components.push(self.component(
            MatchFactor::InterviewReadiness,
            readiness,
            self.weights.interview,
            readiness_notes,
        ));

        let (insight, insight_notes) = match sub_scores.ai_insights {
            Some(insights) if insights.report_count > 0 => (
                bounded(insights.ai_insight_score),
                format!("insight across {} report(s)", insights.report_count),
            ),
            _ => (0.0, "no AI insight reports".to_string()),
        };
        components.push(self.component(
            MatchFactor::AiInsight,
            insight,
            self.weights.ai_insight,
            insight_notes,
        ));

        let total: f64 = components
            .iter()
            .map(|component| component.contribution)
            .sum();

        MatchResult {
            candidate_id: candidate_id.clone(),
            match_score: total.round().clamp(0.0, 100.0) as u8,
            matched_skills,
            components,
        }
    }

    fn component(
        &self,
        factor: MatchFactor,
        value: f64,
        weight: f64,
        notes: String,
    ) -> ScoreComponent {
        ScoreComponent {
            factor,
            value,
            weight,
            contribution: value * weight,
            notes,
        }
    }
}

impl Default for MatchScorer {
    fn default() -> Self {
        Self::new(MatchWeights::default())
    }
}

fn bounded(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
