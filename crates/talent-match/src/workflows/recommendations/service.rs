use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::repository::{CandidateRepository, RepositoryError};
use crate::workflows::matching::{
    AiInsights, CandidateProfile, CompositeInputs, InterviewReadiness, JobRequirement, RankKey,
    RankingPolicy, Recommendation, RecommendationEngine, ScoringConfig, ScoringConfigError,
    SubScores,
};
use crate::workflows::skills::{rebuild_ledger, Assessment, CandidateId, SkillLedger};

/// Service composing the candidate repository with the ledger rebuild and the
/// recommendation engine.
///
/// Ledger rebuilds for one candidate are serialized: the candidate's lock is
/// held from fetching the history until the rebuilt ledger is stored.
pub struct TalentService<R> {
    repository: Arc<R>,
    engine: Arc<RecommendationEngine>,
    rebuild_locks: Mutex<HashMap<CandidateId, Arc<Mutex<()>>>>,
}

impl<R> TalentService<R>
where
    R: CandidateRepository + 'static,
{
    pub fn new(repository: Arc<R>, config: ScoringConfig) -> Self {
        Self {
            repository,
            engine: Arc::new(RecommendationEngine::new(config)),
            rebuild_locks: Mutex::new(HashMap::new()),
        }
    }

    /// Store a newly finalized assessment and rebuild the candidate's ledger.
    pub fn record_assessment(
        &self,
        candidate_id: &CandidateId,
        assessment: Assessment,
    ) -> Result<LedgerView, TalentServiceError> {
        self.with_candidate_lock(candidate_id, || {
            self.repository
                .append_assessment(candidate_id, assessment)?;
            let history = self.repository.assessments(candidate_id)?;
            self.store_rebuilt(candidate_id, &history)
        })
    }

    /// Rebuild a known candidate's ledger from the full stored history.
    pub fn rebuild_ledger(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<LedgerView, TalentServiceError> {
        self.with_candidate_lock(candidate_id, || {
            let history = self.known_history(candidate_id)?;
            self.store_rebuilt(candidate_id, &history)
        })
    }

    /// Fetch the stored ledger; candidates without one have an empty ledger.
    pub fn ledger(&self, candidate_id: &CandidateId) -> Result<LedgerView, TalentServiceError> {
        let ledger = self.repository.ledger(candidate_id)?.unwrap_or_default();
        Ok(LedgerView::new(candidate_id.clone(), ledger))
    }

    pub fn record_ai_insights(
        &self,
        candidate_id: &CandidateId,
        insights: AiInsights,
    ) -> Result<(), TalentServiceError> {
        self.known_history(candidate_id)?;
        self.repository.record_ai_insights(candidate_id, insights)?;
        Ok(())
    }

    /// Store readiness computed upstream; it replaces the history-derived value.
    pub fn record_interview_readiness(
        &self,
        candidate_id: &CandidateId,
        readiness: InterviewReadiness,
    ) -> Result<(), TalentServiceError> {
        self.known_history(candidate_id)?;
        self.repository
            .record_interview_readiness(candidate_id, readiness)?;
        Ok(())
    }

    /// Snapshot used for matching: stored ledger, history size, sub-scores.
    pub fn candidate_profile(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<CandidateProfile, TalentServiceError> {
        let ledger = self.repository.ledger(candidate_id)?.unwrap_or_default();
        let assessments = self.repository.assessments(candidate_id)?;
        let ai_insights = self.repository.ai_insights(candidate_id)?;
        let interview_readiness = match self.repository.interview_readiness(candidate_id)? {
            Some(stored) => stored,
            None => InterviewReadiness::from_history(&assessments),
        };

        Ok(CandidateProfile {
            candidate_id: candidate_id.clone(),
            ledger,
            assessment_count: assessments.len(),
            sub_scores: SubScores {
                interview_readiness: Some(interview_readiness),
                ai_insights,
            },
        })
    }

    /// Score every known candidate against the job and rank the results.
    pub fn recommend(
        &self,
        request: &RecommendationRequest,
    ) -> Result<Vec<Recommendation>, TalentServiceError> {
        let policy = request.policy_override(self.engine.policy())?;

        let mut entries = Vec::new();
        for candidate_id in self.repository.candidate_ids()? {
            let profile = self.candidate_profile(&candidate_id)?;
            let composite = request.composite_inputs(&candidate_id);
            entries.push(
                self.engine
                    .evaluate(&profile, &request.job, composite.as_ref()),
            );
        }

        let scored = entries.len();
        let ranked = self.engine.rank(entries, request.sort_by, policy);
        info!(
            scored,
            returned = ranked.len(),
            sort_by = ?request.sort_by,
            "ranked candidate recommendations"
        );

        Ok(ranked)
    }

    fn known_history(
        &self,
        candidate_id: &CandidateId,
    ) -> Result<Vec<Assessment>, TalentServiceError> {
        let history = self.repository.assessments(candidate_id)?;
        if history.is_empty() {
            return Err(RepositoryError::NotFound.into());
        }
        Ok(history)
    }

    fn store_rebuilt(
        &self,
        candidate_id: &CandidateId,
        history: &[Assessment],
    ) -> Result<LedgerView, TalentServiceError> {
        let ledger = rebuild_ledger(history);
        self.repository
            .replace_ledger(candidate_id, ledger.clone())?;

        debug!(
            candidate = %candidate_id,
            assessments = history.len(),
            skills = ledger.len(),
            "rebuilt skill ledger"
        );

        Ok(LedgerView::new(candidate_id.clone(), ledger))
    }

    /// Run `work` while holding the candidate's rebuild lock. The lock entry is
    /// dropped again once no other caller holds or waits on it.
    fn with_candidate_lock<T>(
        &self,
        candidate_id: &CandidateId,
        work: impl FnOnce() -> Result<T, TalentServiceError>,
    ) -> Result<T, TalentServiceError> {
        let lock = {
            let mut locks = self
                .rebuild_locks
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            Arc::clone(locks.entry(candidate_id.clone()).or_default())
        };

        let outcome = {
            let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);
            work()
        };

        let mut locks = self
            .rebuild_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        drop(lock);
        if locks
            .get(candidate_id)
            .is_some_and(|entry| Arc::strong_count(entry) == 1)
        {
            locks.remove(candidate_id);
        }

        outcome
    }

    #[cfg(test)]
    pub(crate) fn tracked_locks(&self) -> usize {
        self.rebuild_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

/// Matching request: the job, the ranking knobs, and optional evaluation data.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRequest {
    pub job: JobRequirement,
    #[serde(default)]
    pub sort_by: RankKey,
    #[serde(default)]
    pub min_score: Option<u8>,
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub evaluation: Option<EvaluationPlan>,
}

impl RecommendationRequest {
    pub fn for_job(job: JobRequirement) -> Self {
        Self {
            job,
            ..Self::default()
        }
    }

    fn policy_override(
        &self,
        defaults: RankingPolicy,
    ) -> Result<Option<RankingPolicy>, ScoringConfigError> {
        if self.min_score.is_none() && self.limit.is_none() {
            return Ok(None);
        }

        let policy = RankingPolicy {
            min_score: self.min_score.unwrap_or(defaults.min_score),
            limit: self.limit.unwrap_or(defaults.limit),
        };
        policy.validate()?;
        Ok(Some(policy))
    }

    fn composite_inputs(&self, candidate_id: &CandidateId) -> Option<CompositeInputs> {
        let plan = self.evaluation.as_ref()?;
        let scores = plan
            .candidates
            .iter()
            .find(|entry| &entry.candidate_id == candidate_id);

        Some(CompositeInputs {
            cv_score: scores.and_then(|entry| entry.cv_score),
            interview_score: scores.and_then(|entry| entry.interview_score),
            enable_cv_analysis: plan.enable_cv_analysis,
            interview_type: plan.interview_type.clone(),
        })
    }
}

/// Which evaluation stages the job runs, plus per-candidate stage scores.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationPlan {
    #[serde(default)]
    pub enable_cv_analysis: bool,
    #[serde(default)]
    pub interview_type: Option<String>,
    #[serde(default)]
    pub candidates: Vec<CandidateEvaluation>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateEvaluation {
    pub candidate_id: CandidateId,
    #[serde(default)]
    pub cv_score: Option<f64>,
    #[serde(default)]
    pub interview_score: Option<f64>,
}

/// Ledger as exposed to API responses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LedgerView {
    pub candidate_id: CandidateId,
    pub skill_count: usize,
    pub skills: SkillLedger,
}

impl LedgerView {
    pub fn new(candidate_id: CandidateId, skills: SkillLedger) -> Self {
        Self {
            candidate_id,
            skill_count: skills.len(),
            skills,
        }
    }
}

/// Error raised by the talent service.
#[derive(Debug, thiserror::Error)]
pub enum TalentServiceError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),
    #[error("invalid ranking request: {0}")]
    InvalidRequest(#[from] ScoringConfigError),
}
