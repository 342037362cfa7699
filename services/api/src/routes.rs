use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use clearwater::imports::LabCsvImporter;
use clearwater::pools::engine::{self, EvaluationResult, Recommendation, Trend};
use clearwater::pools::intake::IntakeGuard;
use clearwater::pools::{
    pool_router, AlertPublisher, LatestReading, PoolCareService, PoolRepository, ReadingSubmission,
    WaterChemistryReading,
};

/// Stateless one-shot evaluation request: a reading and/or a lab export to
/// evaluate without touching the pool registry.
#[derive(Debug, Deserialize)]
pub(crate) struct ChemistryReportRequest {
    #[serde(default)]
    pub(crate) reading: Option<ReadingSubmission>,
    #[serde(default)]
    pub(crate) symptoms: Vec<String>,
    #[serde(default)]
    pub(crate) evaluated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub(crate) lab_csv: Option<String>,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChemistryReportResponse {
    pub(crate) evaluated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) evaluation: Option<EvaluationResult>,
    pub(crate) needs_attention: bool,
    pub(crate) recommendations: Vec<Recommendation>,
    pub(crate) ph_trend: Trend,
}

pub(crate) fn with_pool_routes<R, A>(service: Arc<PoolCareService<R, A>>) -> axum::Router
where
    R: PoolRepository + 'static,
    A: AlertPublisher + 'static,
{
    pool_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/chemistry/report",
            axum::routing::post(chemistry_report_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn chemistry_report_endpoint(
    Json(payload): Json<ChemistryReportRequest>,
) -> Response {
    let ChemistryReportRequest {
        reading,
        symptoms,
        evaluated_at,
        lab_csv,
    } = payload;
    let evaluated_at = evaluated_at.unwrap_or_else(Utc::now);

    let mut readings: Vec<WaterChemistryReading> = match lab_csv {
        Some(csv) => match LabCsvImporter::from_reader(csv.as_bytes()) {
            Ok(readings) => readings,
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::BAD_REQUEST, Json(payload)).into_response();
            }
        },
        None => Vec::new(),
    };

    if let Some(submission) = reading {
        match IntakeGuard.reading_from_submission(submission) {
            Ok(reading) => readings.push(reading),
            Err(error) => {
                let payload = json!({ "error": error.to_string() });
                return (StatusCode::UNPROCESSABLE_ENTITY, Json(payload)).into_response();
            }
        }
    }

    readings.sort_by(|a, b| b.taken_at.cmp(&a.taken_at));
    let latest = match readings.first() {
        Some(reading) => LatestReading::Recorded(reading.clone()),
        None => LatestReading::Missing,
    };

    // Readings were validated above, so the engine cannot refuse them here.
    let evaluation = match &latest {
        LatestReading::Missing => None,
        LatestReading::Recorded(reading) => engine::evaluate(reading, evaluated_at).ok(),
    };
    let needs_attention = evaluation
        .map(|result| result.needs_attention)
        .unwrap_or(true);
    let recommendations = engine::recommend(&latest, &symptoms).unwrap_or_default();
    let ph_values: Vec<f64> = readings.iter().map(|reading| reading.ph).collect();
    let ph_trend = engine::classify_trend(&ph_values);

    let response = ChemistryReportResponse {
        evaluated_at,
        evaluation,
        needs_attention,
        recommendations,
        ph_trend,
    };
    (StatusCode::OK, Json(response)).into_response()
}
