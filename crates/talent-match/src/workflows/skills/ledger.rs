use super::aggregator::merge_assessment;
use super::domain::{Assessment, SkillLedger};
use super::extractor::extract_skills;

/// Apply a single finalized assessment to a ledger, stamping touched records
/// with the assessment's creation time.
pub fn fold_assessment(ledger: SkillLedger, assessment: &Assessment) -> SkillLedger {
    let skills = extract_skills(assessment);
    merge_assessment(
        ledger,
        &skills,
        assessment.overall_score,
        assessment.created_at,
    )
}

/// Rebuild a candidate's ledger from the complete assessment history.
///
/// The fold always starts from an empty ledger and walks the history in
/// ascending `created_at` order (assessments sharing a timestamp keep their
/// input order), so the result depends only on the history itself.
pub fn rebuild_ledger(history: &[Assessment]) -> SkillLedger {
    let mut ordered: Vec<&Assessment> = history.iter().collect();
    ordered.sort_by_key(|assessment| assessment.created_at);

    ordered
        .into_iter()
        .fold(SkillLedger::new(), fold_assessment)
}
