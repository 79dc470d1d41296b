use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use serde_json::json;
use std::sync::Arc;
use backoffice::workflows::access::AccessPolicy;
use backoffice::workflows::payouts::{payout_router, PayoutRepository, PayoutRouterState, PayoutService};
use backoffice::workflows::trainers::{
    compliance_router, ComplianceRouterState, NoticeMailer, TrainerComplianceService,
    TrainerRepository,
};

/// Compose both workflow routers plus the operational endpoints.
pub(crate) fn with_backoffice_routes<R, M, PR, P>(
    compliance: Arc<TrainerComplianceService<R, M>>,
    payouts: Arc<PayoutService<PR>>,
    access: Arc<P>,
) -> axum::Router
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
    PR: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    compliance_router(ComplianceRouterState {
        service: compliance,
        access: access.clone(),
    })
    .merge(payout_router(PayoutRouterState {
        service: payouts,
        access,
    }))
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
