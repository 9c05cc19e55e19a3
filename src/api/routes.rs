use crate::api::infra::AppState;
use crate::progress::domain::{DocumentType, StudentId, StudentSnapshot};
use crate::progress::{PhaseEntry, ProgressEngine};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Extension, Json, Router};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Deserialize)]
pub(crate) struct ProgressRequest {
    /// Caller-selected destination country; normalized before any matching.
    pub(crate) country: String,
    /// The student's full record set as fetched from the record store.
    pub(crate) snapshot: StudentSnapshot,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProgressResponse {
    pub(crate) generated_on: NaiveDate,
    pub(crate) student_id: StudentId,
    pub(crate) country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) current_phase: Option<crate::progress::pipeline::Phase>,
    pub(crate) overall_percent: u8,
    pub(crate) phases: Vec<PhaseEntry>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PipelineResponse {
    pub(crate) phases: Vec<PipelinePhaseEntry>,
    pub(crate) required_documents: Vec<DocumentType>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PipelinePhaseEntry {
    pub(crate) phase: crate::progress::pipeline::Phase,
    pub(crate) label: String,
}

pub(crate) fn router() -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/pipeline", get(pipeline_endpoint))
        .route("/api/v1/progress", post(progress_endpoint))
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

/// The fixed pipeline constants, for presentation layers that render phase
/// ladders before any student is selected.
pub(crate) async fn pipeline_endpoint(
    Extension(state): Extension<AppState>,
) -> Json<PipelineResponse> {
    Json(pipeline_response(&state.engine))
}

pub(crate) async fn progress_endpoint(
    Extension(state): Extension<AppState>,
    Json(payload): Json<ProgressRequest>,
) -> Json<ProgressResponse> {
    Json(progress_response(
        &state.engine,
        &payload.snapshot,
        &payload.country,
    ))
}

fn pipeline_response(engine: &ProgressEngine) -> PipelineResponse {
    PipelineResponse {
        phases: engine
            .config()
            .phases
            .iter()
            .map(|&phase| PipelinePhaseEntry {
                phase,
                label: phase.label().to_string(),
            })
            .collect(),
        required_documents: engine.config().required_documents.clone(),
    }
}

fn progress_response(
    engine: &ProgressEngine,
    snapshot: &StudentSnapshot,
    country: &str,
) -> ProgressResponse {
    let report = engine.compute(snapshot, country);
    ProgressResponse {
        generated_on: Local::now().date_naive(),
        student_id: report.student_id,
        country: report.country,
        current_phase: report.current_phase,
        overall_percent: report.overall_percent,
        phases: report.phases,
    }
}
