use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde_json::json;
use tracing::warn;

use super::repository::{CandidateRepository, RepositoryError};
use super::service::{RecommendationRequest, TalentService, TalentServiceError};
use crate::workflows::matching::{AiInsights, InterviewReadiness};
use crate::workflows::skills::{Assessment, CandidateId};

/// Router builder exposing ledger maintenance and recommendation endpoints.
pub fn talent_router<R>(service: Arc<TalentService<R>>) -> Router
where
    R: CandidateRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/candidates/:candidate_id/assessments",
            post(record_assessment_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/ledger",
            get(ledger_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/ledger/rebuild",
            post(rebuild_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/insights",
            put(insights_handler::<R>),
        )
        .route(
            "/api/v1/candidates/:candidate_id/readiness",
            put(readiness_handler::<R>),
        )
        .route("/api/v1/recommendations", post(recommend_handler::<R>))
        .with_state(service)
}

pub(crate) async fn record_assessment_handler<R>(
    State(service): State<Arc<TalentService<R>>>,
    Path(candidate_id): Path<String>,
    axum::Json(assessment): axum::Json<Assessment>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    let outcome =
        tokio::task::spawn_blocking(move || service.record_assessment(&id, assessment)).await;
    match outcome {
        Ok(Ok(view)) => (StatusCode::ACCEPTED, axum::Json(view)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => worker_failure(join_error),
    }
}

pub(crate) async fn rebuild_handler<R>(
    State(service): State<Arc<TalentService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    let outcome = tokio::task::spawn_blocking(move || service.rebuild_ledger(&id)).await;
    match outcome {
        Ok(Ok(view)) => (StatusCode::OK, axum::Json(view)).into_response(),
        Ok(Err(error)) => error_response(error),
        Err(join_error) => worker_failure(join_error),
    }
}

pub(crate) async fn ledger_handler<R>(
    State(service): State<Arc<TalentService<R>>>,
    Path(candidate_id): Path<String>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    match service.ledger(&id) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn insights_handler<R>(
    State(service): State<Arc<TalentService<R>>>,
    Path(candidate_id): Path<String>,
    axum::Json(insights): axum::Json<AiInsights>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    match service.record_ai_insights(&id, insights) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn readiness_handler<R>(
    State(service): State<Arc<TalentService<R>>>,
    Path(candidate_id): Path<String>,
    axum::Json(readiness): axum::Json<InterviewReadiness>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    let id = CandidateId(candidate_id);
    match service.record_interview_readiness(&id, readiness) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommend_handler<R>(
    State(service): State<Arc<TalentService<R>>>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: CandidateRepository + 'static,
{
    match service.recommend(&request) {
        Ok(recommendations) => {
            let payload = json!({
                "status": "ok",
                "recommendations": recommendations,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(TalentServiceError::Repository(error)) => {
            warn!(%error, "recommendations unavailable");
            let payload = json!({
                "status": "unavailable",
                "message": "no recommendations available",
                "recommendations": [],
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(other),
    }
}

fn error_response(error: TalentServiceError) -> Response {
    let status = match &error {
        TalentServiceError::InvalidRequest(_) => StatusCode::UNPROCESSABLE_ENTITY,
        TalentServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        TalentServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}

fn worker_failure(error: tokio::task::JoinError) -> Response {
    warn!(%error, "ledger rebuild task failed");
    let payload = json!({
        "error": "ledger rebuild did not complete",
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
