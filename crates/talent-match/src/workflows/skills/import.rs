use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::domain::{Assessment, AssessmentScore, CandidateId};

/// Ordered assessment history for one candidate, as read from an export.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateHistory {
    pub candidate_id: CandidateId,
    pub assessments: Vec<Assessment>,
}

#[derive(Debug, thiserror::Error)]
pub enum AssessmentImportError {
    #[error("failed to read assessment export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid assessment CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: missing candidate_id")]
    MissingCandidate { row: usize },
    #[error("row {row}: created_at '{value}' is not RFC 3339 or YYYY-MM-DD")]
    InvalidTimestamp { row: usize, value: String },
}

pub struct AssessmentImporter;

impl AssessmentImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<CandidateHistory>, AssessmentImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Read an export with `candidate_id, techstack, role, type, overall_score,
    /// created_at` columns, grouped per candidate in first-seen order.
    pub fn from_reader<R: Read>(
        reader: R,
    ) -> Result<Vec<CandidateHistory>, AssessmentImportError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut histories: Vec<CandidateHistory> = Vec::new();
        let mut positions: HashMap<CandidateId, usize> = HashMap::new();

        for (index, record) in csv_reader.deserialize::<AssessmentRow>().enumerate() {
            // Header is line 1.
            let row_number = index + 2;
            let mut row = record?;

            let candidate_id = row
                .candidate_id
                .take()
                .map(CandidateId)
                .ok_or(AssessmentImportError::MissingCandidate { row: row_number })?;
            let assessment = row.into_assessment(row_number)?;

            let position = *positions.entry(candidate_id.clone()).or_insert_with(|| {
                histories.push(CandidateHistory {
                    candidate_id,
                    assessments: Vec::new(),
                });
                histories.len() - 1
            });
            histories[position].assessments.push(assessment);
        }

        for history in &mut histories {
            history
                .assessments
                .sort_by_key(|assessment| assessment.created_at);
        }

        Ok(histories)
    }
}

#[derive(Debug, Deserialize)]
struct AssessmentRow {
    #[serde(default, deserialize_with = "empty_string_as_none")]
    candidate_id: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    techstack: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(rename = "type", default, deserialize_with = "empty_string_as_none")]
    kind: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    overall_score: Option<String>,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    created_at: Option<String>,
}

impl AssessmentRow {
    fn into_assessment(self, row: usize) -> Result<Assessment, AssessmentImportError> {
        let raw_created = self.created_at.unwrap_or_default();
        let created_at = parse_timestamp(&raw_created)
            .ok_or_else(|| AssessmentImportError::InvalidTimestamp {
                row,
                value: raw_created.clone(),
            })?;

        Ok(Assessment {
            techstack: self.techstack,
            role: self.role,
            kind: self.kind,
            overall_score: self
                .overall_score
                .as_deref()
                .map(AssessmentScore::parse)
                .unwrap_or_default(),
            created_at,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
