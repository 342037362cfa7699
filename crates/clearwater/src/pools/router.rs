use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;

use super::domain::{
    AssessmentSubmission, PoolId, PoolRegistration, ReadingSubmission, VisitSubmission,
};
use super::repository::{AlertPublisher, PoolRepository, RepositoryError};
use super::service::{PoolCareError, PoolCareService};

/// Router builder exposing the pool-care HTTP endpoints.
pub fn pool_router<R, A>(service: Arc<PoolCareService<R, A>>) -> Router
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    Router::new()
        .route("/api/v1/pools", post(register_handler::<R, A>))
        .route("/api/v1/pools/:pool_id", get(pool_status_handler::<R, A>))
        .route(
            "/api/v1/pools/:pool_id/readings",
            post(reading_handler::<R, A>),
        )
        .route(
            "/api/v1/pools/:pool_id/readings/import",
            post(import_handler::<R, A>),
        )
        .route(
            "/api/v1/pools/:pool_id/chemistry",
            get(chemistry_handler::<R, A>),
        )
        .route(
            "/api/v1/pools/:pool_id/recommendations",
            post(recommendations_handler::<R, A>),
        )
        .route("/api/v1/pools/:pool_id/visits", post(visit_handler::<R, A>))
        .route(
            "/api/v1/pools/:pool_id/assessments",
            post(assessment_handler::<R, A>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct RecommendationRequest {
    #[serde(default)]
    pub(crate) symptoms: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ImportRequest {
    pub(crate) csv: String,
}

pub(crate) async fn register_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    axum::Json(registration): axum::Json<PoolRegistration>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.register_pool(registration) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn pool_status_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.pool_status(&PoolId(pool_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn reading_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
    axum::Json(submission): axum::Json<ReadingSubmission>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.record_reading(&PoolId(pool_id), submission, Utc::now()) {
        Ok(view) => (StatusCode::ACCEPTED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn import_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
    axum::Json(request): axum::Json<ImportRequest>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    let pool_id = PoolId(pool_id);
    match service.import_readings(&pool_id, request.csv.as_bytes()) {
        Ok(imported) => {
            let payload = json!({
                "pool_id": pool_id.0,
                "imported": imported,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn chemistry_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.chemistry_status(&PoolId(pool_id), Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn recommendations_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
    axum::Json(request): axum::Json<RecommendationRequest>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    let pool_id = PoolId(pool_id);
    match service.recommendations(&pool_id, &request.symptoms) {
        Ok(recommendations) => {
            let payload = json!({
                "pool_id": pool_id.0,
                "recommendations": recommendations,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn visit_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
    axum::Json(submission): axum::Json<VisitSubmission>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.log_visit(&PoolId(pool_id), submission) {
        Ok(view) => (StatusCode::ACCEPTED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn assessment_handler<R, A>(
    State(service): State<Arc<PoolCareService<R, A>>>,
    Path(pool_id): Path<String>,
    axum::Json(submission): axum::Json<AssessmentSubmission>,
) -> Response
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    match service.weekly_assessment(&PoolId(pool_id), submission, Utc::now()) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: PoolCareError) -> Response {
    let payload = json!({ "error": error.to_string() });
    let status = match &error {
        PoolCareError::Intake(_) | PoolCareError::Reading(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PoolCareError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        PoolCareError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PoolCareError::Import(_) => StatusCode::BAD_REQUEST,
        PoolCareError::Repository(RepositoryError::Unavailable(_)) | PoolCareError::Alert(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, axum::Json(payload)).into_response()
}
