use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::workflows::skills::domain::{Assessment, AssessmentScore};

pub(super) fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 5, 1, 9, 0, 0)
        .single()
        .expect("valid base timestamp")
        + Duration::days(offset)
}

pub(super) fn scored(offset: i64, techstack: &str, score: f64) -> Assessment {
    Assessment::new(day(offset))
        .with_techstack(techstack)
        .with_score(score)
}

pub(super) fn unscored(offset: i64, techstack: &str) -> Assessment {
    Assessment::new(day(offset))
        .with_techstack(techstack)
        .with_score(AssessmentScore::absent())
}

pub(super) fn history() -> Vec<Assessment> {
    vec![
        scored(0, "Rust, PostgreSQL", 72.0)
            .with_kind("Technical")
            .with_role("Backend Engineer"),
        scored(3, "rust, Docker", 88.0),
        unscored(5, "Kubernetes, DOCKER"),
        scored(9, "Rust", 64.0).with_role("backend engineer"),
    ]
}
