use crate::workflows::matching::{AiInsights, InterviewReadiness};
use crate::workflows::skills::{Assessment, CandidateId, SkillLedger};

/// Storage abstraction over candidate documents so the service can be
/// exercised in isolation.
///
/// `replace_ledger` must swap the whole stored ledger in one step; readers
/// never observe a partially written ledger.
pub trait CandidateRepository: Send + Sync {
    fn candidate_ids(&self) -> Result<Vec<CandidateId>, RepositoryError>;
    fn assessments(&self, id: &CandidateId) -> Result<Vec<Assessment>, RepositoryError>;
    fn append_assessment(
        &self,
        id: &CandidateId,
        assessment: Assessment,
    ) -> Result<(), RepositoryError>;
    fn ledger(&self, id: &CandidateId) -> Result<Option<SkillLedger>, RepositoryError>;
    fn replace_ledger(&self, id: &CandidateId, ledger: SkillLedger) -> Result<(), RepositoryError>;
    fn ai_insights(&self, id: &CandidateId) -> Result<Option<AiInsights>, RepositoryError>;
    fn record_ai_insights(
        &self,
        id: &CandidateId,
        insights: AiInsights,
    ) -> Result<(), RepositoryError>;
    /// Readiness computed by the interview subsystem, when it supplied one.
    fn interview_readiness(
        &self,
        id: &CandidateId,
    ) -> Result<Option<InterviewReadiness>, RepositoryError>;
    fn record_interview_readiness(
        &self,
        id: &CandidateId,
        readiness: InterviewReadiness,
    ) -> Result<(), RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("candidate not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
