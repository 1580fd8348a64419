use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::matching::ScoringConfig;
use crate::workflows::recommendations::{talent_router, CandidateRepository, TalentService};

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

#[tokio::test]
async fn posting_an_assessment_returns_the_rebuilt_ledger() {
    let (service, _repository) = build_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates/ada/assessments",
            json!({
                "techstack": "React, react, TypeScript",
                "role": "Frontend Engineer",
                "overallScore": 77,
                "createdAt": "2025-08-04T14:00:00Z",
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["candidate_id"], "ada");
    assert_eq!(body["skill_count"], 3);
    assert_eq!(body["skills"][0]["name"], "React");
    assert_eq!(body["skills"][0]["level"], 77);
    assert_eq!(body["skills"][0]["samples"], 1);
}

#[tokio::test]
async fn malformed_score_still_records_skill_names() {
    let (service, _repository) = build_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/candidates/ada/assessments",
            json!({
                "techstack": "Scala",
                "overall_score": "pending",
                "created_at": "2025-08-04T14:00:00Z",
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let body = read_json_body(response).await;
    assert_eq!(body["skills"][0]["name"], "Scala");
    assert_eq!(body["skills"][0]["level"], 0);
    assert_eq!(body["skills"][0]["samples"], 0);
}

#[tokio::test]
async fn ledger_endpoint_reads_the_stored_ledger() {
    let (service, _repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/candidates/grace/ledger")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["skill_count"], 4);
}

#[tokio::test]
async fn rebuild_endpoint_returns_ledger() {
    let (service, _repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/candidates/ada/ledger/rebuild")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["skills"][0]["name"], "Rust");
    assert_eq!(body["skills"][0]["level"], 92);
}

#[tokio::test]
async fn insights_endpoint_accepts_reports() {
    let (service, repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/v1/candidates/grace/insights",
            json!({ "report_count": 3, "ai_insight_score": 64.0 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let stored = repository
        .insights
        .lock()
        .expect("insight mutex poisoned")
        .get(&id("grace"))
        .copied()
        .expect("insights stored");
    assert_eq!(stored.report_count, 3);
}

#[tokio::test]
async fn recommendations_endpoint_returns_ranked_candidates() {
    let (service, _repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/recommendations",
            json!({ "job": { "skills": ["Rust", "Docker", "PostgreSQL"] } }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "ok");
    let recommendations = body["recommendations"]
        .as_array()
        .expect("recommendations array");
    assert_eq!(recommendations.len(), 2);
    assert_eq!(recommendations[0]["candidate_id"], "ada");
    assert_eq!(recommendations[0]["match_score"], 83);
}

#[tokio::test]
async fn recommendations_degrade_when_store_is_unavailable() {
    let service = TalentService::new(Arc::new(UnavailableRepository), ScoringConfig::default());
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/recommendations",
            json!({ "job": { "skills": ["Rust"] } }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json_body(response).await;
    assert_eq!(body["status"], "unavailable");
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn invalid_ranking_override_is_unprocessable() {
    let (service, _repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/recommendations",
            json!({ "job": { "skills": ["Rust"] }, "min_score": 150 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn store_outage_on_ledger_read_is_service_unavailable() {
    let service = TalentService::new(Arc::new(UnavailableRepository), ScoringConfig::default());
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/candidates/ada/ledger")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn rebuilding_an_unknown_candidate_is_not_found() {
    let (service, repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/candidates/ghost/ledger/rebuild")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(!repository
        .candidate_ids()
        .expect("ids")
        .contains(&id("ghost")));
}

#[tokio::test]
async fn insights_for_unknown_candidate_are_not_found() {
    let (service, _repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/v1/candidates/ghost/insights",
            json!({ "report_count": 1, "ai_insight_score": 70.0 }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn readiness_endpoint_stores_external_readiness() {
    let (service, repository) = seeded_service();
    let app = talent_router(Arc::new(service));

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/v1/candidates/linus/readiness",
            json!({
                "interview_count": 3,
                "avg_overall_score": 71.5,
                "readiness_score": 72.0,
            }),
        ))
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let stored = repository
        .interview_readiness(&id("linus"))
        .expect("readiness read")
        .expect("readiness stored");
    assert_eq!(stored.interview_count, 3);
}
