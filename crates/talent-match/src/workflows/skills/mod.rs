//! Skill ledger construction from finalized assessment histories.
//!
//! Everything in this module is a pure transform over snapshots: extraction of
//! skill labels, the running-average merge, and the full-history rebuild that
//! produces the canonical ledger handed back for persistence.

pub mod aggregator;
pub mod domain;
pub mod extractor;
pub mod import;
pub mod ledger;

#[cfg(test)]
mod tests;

pub use aggregator::merge_assessment;
pub use domain::{
    canonical_skill_name, Assessment, AssessmentScore, CandidateId, SkillLedger, SkillRecord,
};
pub use extractor::extract_skills;
pub use import::{AssessmentImportError, AssessmentImporter, CandidateHistory};
pub use ledger::{fold_assessment, rebuild_ledger};
