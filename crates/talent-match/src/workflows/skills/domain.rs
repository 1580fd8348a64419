use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

/// Identifier wrapper for candidates tracked by the platform.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(pub String);

impl CandidateId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identity key for a skill label: trimmed and lower-cased.
///
/// Both the extractor and the match scorer compare skills through this
/// function so deduplication and matching agree on what "the same skill" means.
pub fn canonical_skill_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Optional overall score attached to an assessment.
///
/// Upstream documents carry numbers, numeric strings, nulls, or garbage in this
/// field. Everything that is not a finite number inside `0..=100` is treated as
/// "no score" by [`AssessmentScore::usable`].
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AssessmentScore(Option<f64>);

impl AssessmentScore {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 100.0;

    pub const fn new(value: f64) -> Self {
        Self(Some(value))
    }

    pub const fn absent() -> Self {
        Self(None)
    }

    /// Parse a free-text cell, e.g. from a CSV export.
    pub fn parse(raw: &str) -> Self {
        Self(raw.trim().parse::<f64>().ok())
    }

    pub fn raw(&self) -> Option<f64> {
        self.0
    }

    pub fn usable(&self) -> Option<f64> {
        self.0
            .filter(|value| value.is_finite() && (Self::MIN..=Self::MAX).contains(value))
    }

    fn from_json(value: Option<&Value>) -> Self {
        match value {
            Some(Value::Number(number)) => Self(number.as_f64()),
            Some(Value::String(text)) => Self::parse(text),
            _ => Self::absent(),
        }
    }
}

impl From<Option<f64>> for AssessmentScore {
    fn from(value: Option<f64>) -> Self {
        Self(value)
    }
}

impl Serialize for AssessmentScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        // Non-finite values have no JSON representation.
        self.0.filter(|value| value.is_finite()).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for AssessmentScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Option::<Value>::deserialize(deserializer)?;
        Ok(Self::from_json(value.as_ref()))
    }
}

/// One finalized assessment as handed over by the interview subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Assessment {
    #[serde(default, deserialize_with = "lenient_text")]
    pub techstack: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub role: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(default, alias = "overallScore")]
    pub overall_score: AssessmentScore,
    #[serde(alias = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Assessment {
    pub fn new(created_at: DateTime<Utc>) -> Self {
        Self {
            techstack: None,
            role: None,
            kind: None,
            overall_score: AssessmentScore::absent(),
            created_at,
        }
    }

    pub fn with_techstack(mut self, techstack: impl Into<String>) -> Self {
        self.techstack = Some(techstack.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    pub fn with_score(mut self, score: impl Into<AssessmentScore>) -> Self {
        self.overall_score = score.into();
        self
    }
}

impl From<f64> for AssessmentScore {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(text)) => Some(text),
        _ => None,
    })
}

/// Per-skill proficiency kept as a running average over scored assessments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillRecord {
    pub name: String,
    pub level: u8,
    pub samples: u32,
    pub updated_at: DateTime<Utc>,
}

impl SkillRecord {
    pub fn canonical_name(&self) -> String {
        canonical_skill_name(&self.name)
    }
}

/// A candidate's skill records, unique by canonical name, in first-seen order.
///
/// Stored documents are decoded through [`SkillLedger::from_records`], so a
/// ledger read back from storage holds the same invariants as a rebuilt one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<SkillRecord>", into = "Vec<SkillRecord>")]
pub struct SkillLedger {
    records: Vec<SkillRecord>,
}

impl SkillLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a ledger from stored records, keeping the first record per
    /// canonical name and clamping levels into range.
    pub fn from_records(records: Vec<SkillRecord>) -> Self {
        let mut seen = HashSet::new();
        let records = records
            .into_iter()
            .filter(|record| {
                let key = record.canonical_name();
                !key.is_empty() && seen.insert(key)
            })
            .map(|mut record| {
                record.level = record.level.min(100);
                record
            })
            .collect();

        Self { records }
    }

    pub(crate) fn from_canonical(records: Vec<SkillRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SkillRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<SkillRecord> {
        self.records
    }

    pub fn get(&self, name: &str) -> Option<&SkillRecord> {
        let key = canonical_skill_name(name);
        self.records
            .iter()
            .find(|record| record.canonical_name() == key)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn canonical_names(&self) -> HashSet<String> {
        self.records
            .iter()
            .map(SkillRecord::canonical_name)
            .collect()
    }
}

impl From<Vec<SkillRecord>> for SkillLedger {
    fn from(records: Vec<SkillRecord>) -> Self {
        Self::from_records(records)
    }
}

impl From<SkillLedger> for Vec<SkillRecord> {
    fn from(ledger: SkillLedger) -> Self {
        ledger.records
    }
}
