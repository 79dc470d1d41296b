use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use tower::ServiceExt;

use super::common::*;
use crate::workflows::trainers::router::ComplianceRouterState;
use crate::workflows::trainers::{compliance_router, TrainerComplianceService};

fn post_json(uri: &str, payload: serde_json::Value) -> axum::http::Request<axum::body::Body> {
    axum::http::Request::post(uri)
        .header(axum::http::header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from(
            serde_json::to_vec(&payload).expect("serialize payload"),
        ))
        .expect("request")
}

#[tokio::test]
async fn request_route_returns_receipt() {
    let (service, _, mailer) = build_service();
    let router = compliance_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/trainers/42/compliance/requests",
            json!({ "document": "w9", "actor": 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::ACCEPTED);
    let payload = read_json_body(response).await;
    assert!(payload
        .get("message")
        .and_then(serde_json::Value::as_str)
        .unwrap_or_default()
        .contains("coach@example.com"));
    assert_eq!(
        payload.pointer("/receipt/document"),
        Some(&json!("w9")),
    );
    assert_eq!(mailer.sent().len(), 1);
}

#[tokio::test]
async fn request_route_maps_unknown_trainer_to_404() {
    let (service, _, _) = build_service();
    let router = compliance_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/trainers/999/compliance/requests",
            json!({ "document": "safesport", "actor": 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_route_maps_delivery_failure_to_502() {
    let repository = Arc::new(MemoryTrainers::default());
    repository.seed(coach_record());
    let service =
        TrainerComplianceService::new(repository, Arc::new(RejectingMailer), catalog());
    let router = compliance_router(ComplianceRouterState {
        service: Arc::new(service),
        access: Arc::new(crate::workflows::access::OpenAccess),
    });

    let response = router
        .oneshot(post_json(
            "/api/v1/trainers/42/compliance/requests",
            json!({ "document": "w9", "actor": 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn verification_route_applies_the_update() {
    let (service, _, _) = build_service();
    let router = compliance_router_with_service(service);

    let response = router
        .oneshot(post_json(
            "/api/v1/trainers/42/verification",
            json!({ "verified": true, "safesport": true, "actor": 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("is_verified"), Some(&json!(true)));
    assert_eq!(payload.get("safesport_verified"), Some(&json!(true)));
    assert_eq!(payload.get("w9_submitted"), Some(&json!(false)));
}

#[tokio::test]
async fn denied_operator_is_rejected_before_the_service_runs() {
    let (service, _, mailer) = build_service();
    let router = compliance_router(ComplianceRouterState {
        service: Arc::new(service),
        access: Arc::new(DenyAll),
    });

    let response = router
        .oneshot(post_json(
            "/api/v1/trainers/42/compliance/requests",
            json!({ "document": "w9", "actor": 1 }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert!(mailer.sent().is_empty(), "no notice behind a denied gate");
}

#[tokio::test]
async fn status_route_returns_the_compliance_view() {
    let (service, _, _) = build_service();
    let router = compliance_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/trainers/42/compliance")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.get("trainer_id"), Some(&json!(42)));
    assert_eq!(payload.get("is_verified"), Some(&json!(false)));
}

#[tokio::test]
async fn outstanding_route_honors_the_limit() {
    let (service, _, _) = build_service();
    let router = compliance_router_with_service(service);

    let response = router
        .oneshot(
            axum::http::Request::get("/api/v1/trainers/unverified?limit=1")
                .body(axum::body::Body::empty())
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload.as_array().map(Vec::len), Some(1));
}
