//! Orchestration around the pure skill and matching transforms: fetching
//! histories, serialized ledger rebuilds, atomic ledger replacement, and the
//! HTTP surface that drives them.

pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use repository::{CandidateRepository, RepositoryError};
pub use router::talent_router;
pub use service::{
    CandidateEvaluation, EvaluationPlan, LedgerView, RecommendationRequest, TalentService,
    TalentServiceError,
};
