use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::ProgramConfig;
use super::export::{self, ExportFormat};
use super::history::{ResultLog, RECENT_RESULTS_CAPACITY};
use super::service::{DealEvaluationService, DealServiceError, DealSubmission};

/// Router builder exposing deal evaluation, export, history and program endpoints.
pub fn deal_router<L>(service: Arc<DealEvaluationService<L>>) -> Router
where
    L: ResultLog + 'static,
{
    Router::new()
        .route("/api/v1/deals/evaluate", post(evaluate_handler::<L>))
        .route("/api/v1/deals/export", post(export_handler::<L>))
        .route("/api/v1/deals/recent", get(recent_handler::<L>))
        .route(
            "/api/v1/program",
            get(program_handler::<L>).put(replace_program_handler::<L>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct ExportQuery {
    #[serde(default)]
    format: ExportFormat,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct RecentQuery {
    limit: Option<usize>,
}

pub(crate) async fn evaluate_handler<L>(
    State(service): State<Arc<DealEvaluationService<L>>>,
    Json(submission): Json<DealSubmission>,
) -> Response
where
    L: ResultLog + 'static,
{
    match service.evaluate(submission) {
        Ok(record) => (StatusCode::OK, Json(record)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn export_handler<L>(
    State(service): State<Arc<DealEvaluationService<L>>>,
    Query(query): Query<ExportQuery>,
    Json(submission): Json<DealSubmission>,
) -> Response
where
    L: ResultLog + 'static,
{
    let record = match service.preview(submission) {
        Ok(record) => record,
        Err(err) => return service_error_response(err),
    };

    match export::render(&record, query.format) {
        Ok(body) => {
            let disposition = format!(
                "attachment; filename=\"{}\"",
                export::file_name(&record, query.format)
            );
            (
                StatusCode::OK,
                [
                    (header::CONTENT_TYPE, query.format.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response()
        }
        Err(err) => error_response(StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
    }
}

pub(crate) async fn recent_handler<L>(
    State(service): State<Arc<DealEvaluationService<L>>>,
    Query(query): Query<RecentQuery>,
) -> Response
where
    L: ResultLog + 'static,
{
    let limit = query.limit.unwrap_or(RECENT_RESULTS_CAPACITY);
    match service.recent(limit) {
        Ok(records) => (StatusCode::OK, Json(records)).into_response(),
        Err(err) => service_error_response(err),
    }
}

pub(crate) async fn program_handler<L>(
    State(service): State<Arc<DealEvaluationService<L>>>,
) -> Response
where
    L: ResultLog + 'static,
{
    let program = service.program();
    (StatusCode::OK, Json(program.as_ref().clone())).into_response()
}

pub(crate) async fn replace_program_handler<L>(
    State(service): State<Arc<DealEvaluationService<L>>>,
    Json(program): Json<ProgramConfig>,
) -> Response
where
    L: ResultLog + 'static,
{
    match service.replace_program(program) {
        Ok(program) => (StatusCode::OK, Json(program.as_ref().clone())).into_response(),
        Err(err) => service_error_response(err),
    }
}

fn service_error_response(err: DealServiceError) -> Response {
    let status = match err {
        DealServiceError::Configuration(_) => StatusCode::UNPROCESSABLE_ENTITY,
        DealServiceError::Log(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    error_response(status, err.to_string())
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
