use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::response::Response;
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::program::deal_router;

fn deal_payload() -> Value {
    json!({
        "product": "NovaEdge",
        "region": "NA",
        "role": "AE",
        "annual_order_value": 300000,
        "contract_term_months": 18,
        "signing_date": "2025-09-15",
        "launch_or_announce_date": "2025-08-01",
        "external_ref": "006xx00000ABC123"
    })
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request builds")
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body readable");
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).expect("json body")
}

#[tokio::test]
async fn evaluate_route_returns_record() {
    let (service, _log) = service_with_capacity(5);
    let app = deal_router(service);

    let response = app
        .oneshot(json_request("POST", "/api/v1/deals/evaluate", &deal_payload()))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["deal"]["currency"], "USD");
    assert_eq!(body["deal"]["product_type_push"], true);
    assert_eq!(body["result"]["eligible"], true);
    assert_eq!(body["result"]["tier"], "Tier 2");
    assert_eq!(body["result"]["gross_bonus_usd"], 7500.0);
    assert_eq!(body["result"]["payouts"][0]["date"], "2025-09-30");
}

#[tokio::test]
async fn export_route_sets_download_headers() {
    let (service, _log) = service_with_capacity(5);
    let app = deal_router(service);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/deals/export?format=csv",
            &deal_payload(),
        ))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/csv"
    );
    assert_eq!(
        response.headers()[header::CONTENT_DISPOSITION],
        "attachment; filename=\"bonus_006xx00000ABC123.csv\""
    );
    assert!(body_text(response).await.starts_with("SFDC_PO_ID,"));
}

#[tokio::test]
async fn export_route_leaves_history_untouched() {
    let (service, _log) = service_with_capacity(5);

    let response = deal_router(service.clone())
        .oneshot(json_request("POST", "/api/v1/deals/evaluate", &deal_payload()))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = deal_router(service.clone())
        .oneshot(json_request(
            "POST",
            "/api/v1/deals/export?format=json",
            &deal_payload(),
        ))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);

    let response = deal_router(service)
        .oneshot(
            Request::builder()
                .uri("/api/v1/deals/recent")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("response");

    let body = body_json(response).await;
    assert_eq!(body.as_array().expect("array body").len(), 1);
}

#[tokio::test]
async fn recent_route_lists_newest_first() {
    let (service, _log) = service_with_capacity(5);

    let mut first = deal_payload();
    first["external_ref"] = json!("first");
    let mut second = deal_payload();
    second["external_ref"] = json!("second");
    for payload in [first, second] {
        let response = deal_router(service.clone())
            .oneshot(json_request("POST", "/api/v1/deals/evaluate", &payload))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = deal_router(service)
        .oneshot(
            Request::builder()
                .uri("/api/v1/deals/recent?limit=1")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("response");

    let body = body_json(response).await;
    let records = body.as_array().expect("array body");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["deal"]["external_ref"], "second");
}

#[tokio::test]
async fn program_route_rejects_invalid_replacement() {
    let (service, _log) = service_with_capacity(5);

    let mut program = serde_json::to_value(program()).expect("program serializes");
    program["tiers"] = json!([]);

    let response = deal_router(service.clone())
        .oneshot(json_request("PUT", "/api/v1/program", &program))
        .await
        .expect("response");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert!(body["error"]
        .as_str()
        .expect("error message")
        .contains("no tiers"));

    let response = deal_router(service)
        .oneshot(
            Request::builder()
                .uri("/api/v1/program")
                .body(Body::empty())
                .expect("request builds"),
        )
        .await
        .expect("response");
    let body = body_json(response).await;
    assert_eq!(body["tiers"].as_array().map(Vec::len), Some(3));
}
