//! Candidate-to-job scoring, composite evaluation, and ranking.

mod composer;
mod config;
mod domain;
mod ranker;
mod scorer;

pub use composer::PerformanceComposer;
pub use config::{CompositeWeights, MatchWeights, RankingPolicy, ScoringConfig, ScoringConfigError};
pub use domain::{
    AiInsights, CandidateProfile, CompositeInputs, CompositeScore, InterviewReadiness,
    JobRequirement, MatchFactor, MatchResult, RankKey, Recommendation, ScoreComponent, SubScores,
};
pub use ranker::Ranker;
pub use scorer::MatchScorer;

/// Stateless engine applying one scoring configuration to candidate snapshots.
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    scorer: MatchScorer,
    composer: PerformanceComposer,
    ranker: Ranker,
}

impl RecommendationEngine {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            scorer: MatchScorer::new(config.match_weights),
            composer: PerformanceComposer::new(config.composite_weights),
            ranker: Ranker::new(config.ranking),
        }
    }

    pub fn policy(&self) -> RankingPolicy {
        self.ranker.policy()
    }

    /// Score one candidate, blending in composite evaluation inputs when given.
    pub fn evaluate(
        &self,
        profile: &CandidateProfile,
        job: &JobRequirement,
        composite: Option<&CompositeInputs>,
    ) -> Recommendation {
        let result = self.scorer.score(
            &profile.candidate_id,
            &profile.ledger,
            job,
            &profile.sub_scores,
        );
        let recommendation = Recommendation::from_match(result, profile.assessment_count);

        match composite {
            Some(inputs) => recommendation.with_composite(self.composer.compose(inputs)),
            None => recommendation,
        }
    }

    /// Rank with the configured policy, or an override for this request.
    pub fn rank(
        &self,
        entries: Vec<Recommendation>,
        key: RankKey,
        policy: Option<RankingPolicy>,
    ) -> Vec<Recommendation> {
        match policy {
            Some(policy) => Ranker::new(policy).rank(entries, key),
            None => self.ranker.rank(entries, key),
        }
    }
}

impl Default for RecommendationEngine {
    fn default() -> Self {
        Self::new(ScoringConfig::default())
    }
}
