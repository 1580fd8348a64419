use std::cmp::Ordering;

use super::config::RankingPolicy;
use super::domain::{RankKey, Recommendation};

/// Deterministic filter, sort, and truncate over scored candidates.
#[derive(Debug, Clone, Copy, Default)]
pub struct Ranker {
    policy: RankingPolicy,
}

impl Ranker {
    pub fn new(policy: RankingPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> RankingPolicy {
        self.policy
    }

    pub fn rank(&self, entries: Vec<Recommendation>, key: RankKey) -> Vec<Recommendation> {
        self.rank_filtered(entries, key, |_| true)
    }

    /// Keep entries accepted by `filter` whose selected score meets the
    /// threshold, order them best first, and cut to the policy limit.
    ///
    /// The sort is stable: entries that compare equal keep their input order.
    pub fn rank_filtered<F>(
        &self,
        entries: Vec<Recommendation>,
        key: RankKey,
        filter: F,
    ) -> Vec<Recommendation>
    where
        F: Fn(&Recommendation) -> bool,
    {
        let mut ranked: Vec<Recommendation> = entries
            .into_iter()
            .filter(|entry| filter(entry))
            .filter(|entry| {
                entry
                    .score_for(key)
                    .is_some_and(|score| score >= self.policy.min_score)
            })
            .collect();

        ranked.sort_by(|left, right| compare(left, right, key));
        ranked.truncate(self.policy.limit);
        ranked
    }
}

fn compare(left: &Recommendation, right: &Recommendation, key: RankKey) -> Ordering {
    let by_score = right.score_for(key).cmp(&left.score_for(key));
    match key {
        RankKey::Match => by_score
            .then_with(|| right.matched_skills.len().cmp(&left.matched_skills.len()))
            .then_with(|| right.assessment_count.cmp(&left.assessment_count)),
        RankKey::Performance => by_score,
    }
}
