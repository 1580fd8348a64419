use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde_json::Value;

use crate::workflows::matching::{AiInsights, InterviewReadiness, ScoringConfig};
use crate::workflows::recommendations::repository::{CandidateRepository, RepositoryError};
use crate::workflows::recommendations::TalentService;
use crate::workflows::skills::{Assessment, CandidateId, SkillLedger};

pub(super) fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 4, 14, 0, 0)
        .single()
        .expect("valid base timestamp")
        + Duration::days(offset)
}

pub(super) fn assessment(offset: i64, techstack: &str, score: f64) -> Assessment {
    Assessment::new(day(offset))
        .with_techstack(techstack)
        .with_kind("Technical")
        .with_score(score)
}

pub(super) fn id(value: &str) -> CandidateId {
    CandidateId::new(value)
}

pub(super) fn build_service() -> (TalentService<MemoryRepository>, Arc<MemoryRepository>) {
    let repository = Arc::new(MemoryRepository::default());
    let service = TalentService::new(repository.clone(), ScoringConfig::default());
    (service, repository)
}

/// Service seeded with three candidates of differing fit for a backend job.
pub(super) fn seeded_service() -> (TalentService<MemoryRepository>, Arc<MemoryRepository>) {
    let (service, repository) = build_service();

    let seeds = [
        ("ada", vec![assessment(0, "Rust, PostgreSQL, Docker", 92.0)]),
        (
            "grace",
            vec![
                assessment(0, "rust, Kubernetes", 70.0),
                assessment(2, "Go", 80.0),
            ],
        ),
        ("linus", vec![assessment(1, "C, Git", 95.0)]),
    ];

    for (candidate, history) in seeds {
        for entry in history {
            service
                .record_assessment(&id(candidate), entry)
                .expect("seed assessment");
        }
    }

    (service, repository)
}

#[derive(Default)]
pub(super) struct MemoryRepository {
    pub(super) order: Mutex<Vec<CandidateId>>,
    pub(super) assessments: Mutex<HashMap<CandidateId, Vec<Assessment>>>,
    pub(super) ledgers: Mutex<HashMap<CandidateId, SkillLedger>>,
    pub(super) insights: Mutex<HashMap<CandidateId, AiInsights>>,
    pub(super) readiness: Mutex<HashMap<CandidateId, InterviewReadiness>>,
}

impl CandidateRepository for MemoryRepository {
    fn candidate_ids(&self) -> Result<Vec<CandidateId>, RepositoryError> {
        Ok(self.order.lock().expect("order mutex poisoned").clone())
    }

    fn assessments(&self, id: &CandidateId) -> Result<Vec<Assessment>, RepositoryError> {
        let guard = self.assessments.lock().expect("assessment mutex poisoned");
        Ok(guard.get(id).cloned().unwrap_or_default())
    }

    fn append_assessment(
        &self,
        id: &CandidateId,
        assessment: Assessment,
    ) -> Result<(), RepositoryError> {
        let mut order = self.order.lock().expect("order mutex poisoned");
        if !order.contains(id) {
            order.push(id.clone());
        }
        let mut guard = self.assessments.lock().expect("assessment mutex poisoned");
        guard.entry(id.clone()).or_default().push(assessment);
        Ok(())
    }

    fn ledger(&self, id: &CandidateId) -> Result<Option<SkillLedger>, RepositoryError> {
        let guard = self.ledgers.lock().expect("ledger mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn replace_ledger(&self, id: &CandidateId, ledger: SkillLedger) -> Result<(), RepositoryError> {
        let mut guard = self.ledgers.lock().expect("ledger mutex poisoned");
        guard.insert(id.clone(), ledger);
        Ok(())
    }

    fn ai_insights(&self, id: &CandidateId) -> Result<Option<AiInsights>, RepositoryError> {
        let guard = self.insights.lock().expect("insight mutex poisoned");
        Ok(guard.get(id).copied())
    }

    fn record_ai_insights(
        &self,
        id: &CandidateId,
        insights: AiInsights,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.insights.lock().expect("insight mutex poisoned");
        guard.insert(id.clone(), insights);
        Ok(())
    }

    fn interview_readiness(
        &self,
        id: &CandidateId,
    ) -> Result<Option<InterviewReadiness>, RepositoryError> {
        let guard = self.readiness.lock().expect("readiness mutex poisoned");
        Ok(guard.get(id).copied())
    }

    fn record_interview_readiness(
        &self,
        id: &CandidateId,
        readiness: InterviewReadiness,
    ) -> Result<(), RepositoryError> {
        let mut guard = self.readiness.lock().expect("readiness mutex poisoned");
        guard.insert(id.clone(), readiness);
        Ok(())
    }
}

pub(super) struct UnavailableRepository;

impl CandidateRepository for UnavailableRepository {
    fn candidate_ids(&self) -> Result<Vec<CandidateId>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn assessments(&self, _id: &CandidateId) -> Result<Vec<Assessment>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn append_assessment(
        &self,
        _id: &CandidateId,
        _assessment: Assessment,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn ledger(&self, _id: &CandidateId) -> Result<Option<SkillLedger>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn replace_ledger(
        &self,
        _id: &CandidateId,
        _ledger: SkillLedger,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn ai_insights(&self, _id: &CandidateId) -> Result<Option<AiInsights>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn record_ai_insights(
        &self,
        _id: &CandidateId,
        _insights: AiInsights,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn interview_readiness(
        &self,
        _id: &CandidateId,
    ) -> Result<Option<InterviewReadiness>, RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }

    fn record_interview_readiness(
        &self,
        _id: &CandidateId,
        _readiness: InterviewReadiness,
    ) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("document store offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
