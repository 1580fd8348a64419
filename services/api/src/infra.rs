use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use talent_match::workflows::matching::{AiInsights, InterviewReadiness};
use talent_match::workflows::recommendations::{
    CandidateRepository, RepositoryError, TalentService, TalentServiceError,
};
use talent_match::workflows::skills::{Assessment, CandidateHistory, CandidateId, SkillLedger};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default)]
struct CandidateDocument {
    assessments: Vec<Assessment>,
    ledger: Option<SkillLedger>,
    ai_insights: Option<AiInsights>,
    interview_readiness: Option<InterviewReadiness>,
}

/// Process-local candidate store. Candidates are listed in the order their
/// first assessment arrived.
#[derive(Default, Clone)]
pub(crate) struct InMemoryCandidateRepository {
    order: Arc<Mutex<Vec<CandidateId>>>,
    documents: Arc<Mutex<HashMap<CandidateId, CandidateDocument>>>,
}

impl InMemoryCandidateRepository {
    fn with_document<T>(
        &self,
        id: &CandidateId,
        apply: impl FnOnce(&mut CandidateDocument) -> T,
    ) -> T {
        let mut documents = self.documents.lock().expect("repository mutex poisoned");
        apply(documents.entry(id.clone()).or_default())
    }
}

impl CandidateRepository for InMemoryCandidateRepository {
    fn candidate_ids(&self) -> Result<Vec<CandidateId>, RepositoryError> {
        Ok(self.order.lock().expect("repository mutex poisoned").clone())
    }

    fn assessments(&self, id: &CandidateId) -> Result<Vec<Assessment>, RepositoryError> {
        let documents = self.documents.lock().expect("repository mutex poisoned");
        Ok(documents
            .get(id)
            .map(|document| document.assessments.clone())
            .unwrap_or_default())
    }

    fn append_assessment(
        &self,
        id: &CandidateId,
        assessment: Assessment,
    ) -> Result<(), RepositoryError> {
        let mut documents = self.documents.lock().expect("repository mutex poisoned");
        let document = documents.entry(id.clone()).or_default();
        if document.assessments.is_empty() {
            self.order
                .lock()
                .expect("repository mutex poisoned")
                .push(id.clone());
        }
        document.assessments.push(assessment);
        Ok(())
    }

    fn ledger(&self, id: &CandidateId) -> Result<Option<SkillLedger>, RepositoryError> {
        let documents = self.documents.lock().expect("repository mutex poisoned");
        Ok(documents.get(id).and_then(|document| document.ledger.clone()))
    }

    fn replace_ledger(&self, id: &CandidateId, ledger: SkillLedger) -> Result<(), RepositoryError> {
        self.with_document(id, |document| document.ledger = Some(ledger));
        Ok(())
    }

    fn ai_insights(&self, id: &CandidateId) -> Result<Option<AiInsights>, RepositoryError> {
        let documents = self.documents.lock().expect("repository mutex poisoned");
        Ok(documents.get(id).and_then(|document| document.ai_insights))
    }

    fn record_ai_insights(
        &self,
        id: &CandidateId,
        insights: AiInsights,
    ) -> Result<(), RepositoryError> {
        self.with_document(id, |document| document.ai_insights = Some(insights));
        Ok(())
    }

    fn interview_readiness(
        &self,
        id: &CandidateId,
    ) -> Result<Option<InterviewReadiness>, RepositoryError> {
        let documents = self.documents.lock().expect("repository mutex poisoned");
        Ok(documents
            .get(id)
            .and_then(|document| document.interview_readiness))
    }

    fn record_interview_readiness(
        &self,
        id: &CandidateId,
        readiness: InterviewReadiness,
    ) -> Result<(), RepositoryError> {
        self.with_document(id, |document| {
            document.interview_readiness = Some(readiness)
        });
        Ok(())
    }
}

/// Replay imported histories through the service so stored ledgers match a
/// full rebuild. Returns the number of assessments recorded.
pub(crate) fn seed_histories<R>(
    service: &TalentService<R>,
    histories: Vec<CandidateHistory>,
) -> Result<usize, TalentServiceError>
where
    R: CandidateRepository + 'static,
{
    let mut recorded = 0;
    for history in histories {
        for assessment in history.assessments {
            service.record_assessment(&history.candidate_id, assessment)?;
            recorded += 1;
        }
    }
    Ok(recorded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use talent_match::workflows::matching::ScoringConfig;

    #[test]
    fn seeding_rebuilds_each_candidate_ledger() {
        let repository = Arc::new(InMemoryCandidateRepository::default());
        let service = TalentService::new(repository.clone(), ScoringConfig::default());
        let at = Utc
            .with_ymd_and_hms(2025, 6, 2, 10, 0, 0)
            .single()
            .expect("valid timestamp");

        let histories = vec![
            CandidateHistory {
                candidate_id: CandidateId::new("mira"),
                assessments: vec![
                    Assessment::new(at).with_techstack("Rust, Go").with_score(70.0),
                    Assessment::new(at).with_techstack("rust").with_score(90.0),
                ],
            },
            CandidateHistory {
                candidate_id: CandidateId::new("otto"),
                assessments: vec![Assessment::new(at).with_role("SRE")],
            },
        ];

        let recorded = seed_histories(&service, histories).expect("seed succeeds");

        assert_eq!(recorded, 3);
        assert_eq!(
            repository.candidate_ids().expect("ids"),
            vec![CandidateId::new("mira"), CandidateId::new("otto")]
        );
        let ledger = repository
            .ledger(&CandidateId::new("mira"))
            .expect("ledger read")
            .expect("ledger stored");
        let rust = ledger.get("RUST").expect("rust tracked");
        assert_eq!(rust.level, 80);
        assert_eq!(rust.samples, 2);
    }

    #[test]
    fn unknown_candidates_are_not_registered_by_rebuilds_or_insights() {
        let repository = Arc::new(InMemoryCandidateRepository::default());
        let service = TalentService::new(repository.clone(), ScoringConfig::default());
        let ghost = CandidateId::new("ghost");

        assert!(matches!(
            service.rebuild_ledger(&ghost),
            Err(TalentServiceError::Repository(RepositoryError::NotFound))
        ));
        assert!(service
            .record_ai_insights(
                &ghost,
                AiInsights {
                    report_count: 1,
                    ai_insight_score: 50.0,
                },
            )
            .is_err());

        assert!(repository.candidate_ids().expect("ids").is_empty());
        assert_eq!(repository.ledger(&ghost).expect("ledger read"), None);
    }
}
