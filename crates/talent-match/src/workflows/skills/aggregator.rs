use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use super::domain::{canonical_skill_name, AssessmentScore, SkillLedger, SkillRecord};

/// Fold one assessment's skills into a ledger, returning the updated ledger.
///
/// A usable score moves each named skill's level by running average and bumps
/// its sample count. Without a usable score the skill is still recorded (new
/// skills start at level 0 with no samples) and `updated_at` is refreshed.
pub fn merge_assessment(
    ledger: SkillLedger,
    skills: &[String],
    score: AssessmentScore,
    at: DateTime<Utc>,
) -> SkillLedger {
    let mut records = ledger.into_records();
    let mut index: HashMap<String, usize> = records
        .iter()
        .enumerate()
        .map(|(position, record)| (record.canonical_name(), position))
        .collect();
    let mut handled = HashSet::new();
    let score = score.usable();

    for name in skills {
        let display = name.trim();
        let key = canonical_skill_name(display);
        if key.is_empty() || !handled.insert(key.clone()) {
            continue;
        }

        match index.get(&key).copied() {
            Some(position) => {
                let record = &mut records[position];
                if let Some(score) = score {
                    record.level = running_average(record.level, record.samples, score);
                    record.samples = record.samples.saturating_add(1);
                }
                record.updated_at = at;
            }
            None => {
                records.push(SkillRecord {
                    name: display.to_string(),
                    level: score.map(round_level).unwrap_or(0),
                    samples: u32::from(score.is_some()),
                    updated_at: at,
                });
                index.insert(key, records.len() - 1);
            }
        }
    }

    SkillLedger::from_canonical(records)
}

fn running_average(level: u8, samples: u32, score: f64) -> u8 {
    let total = f64::from(level) * f64::from(samples) + score;
    round_level(total / (f64::from(samples) + 1.0))
}

fn round_level(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}
