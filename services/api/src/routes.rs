use std::sync::Arc;

use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use bonus_accelerator::program::{deal_router, DealEvaluationService, ResultLog};
use serde_json::json;

use crate::infra::AppState;

pub(crate) fn with_deal_routes<L>(service: Arc<DealEvaluationService<L>>) -> axum::Router
where
    L: ResultLog + 'static,
{
    deal_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
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

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use bonus_accelerator::program::default_program;
    use bonus_accelerator::program::history::BoundedResultLog;
    use tower::ServiceExt;

    fn service() -> Arc<DealEvaluationService<BoundedResultLog>> {
        Arc::new(DealEvaluationService::new(
            default_program(),
            Arc::new(BoundedResultLog::default()),
        ))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn deal_routes_are_mounted_alongside_health() {
        let app = with_deal_routes(service());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/api/v1/program")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
    }
}
