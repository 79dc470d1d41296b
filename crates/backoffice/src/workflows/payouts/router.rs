use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::domain::{CompletePayout, NewPayout, PayoutId};
use super::export;
use super::repository::{PayoutRepository, RepositoryError};
use super::service::{PayoutService, PayoutServiceError};
use crate::workflows::access::AccessPolicy;
use crate::workflows::trainers::TrainerId;

/// Shared state for the payout endpoints: the service plus the boundary
/// capability check.
pub struct PayoutRouterState<R, P> {
    pub service: Arc<PayoutService<R>>,
    pub access: Arc<P>,
}

impl<R, P> Clone for PayoutRouterState<R, P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            access: self.access.clone(),
        }
    }
}

/// Router builder exposing HTTP endpoints for the payout workflow.
pub fn payout_router<R, P>(state: PayoutRouterState<R, P>) -> Router
where
    R: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    Router::new()
        .route("/api/v1/payouts", post(create_handler::<R, P>))
        .route("/api/v1/payouts/:payout_id", get(status_handler::<R, P>))
        .route(
            "/api/v1/payouts/:payout_id/complete",
            post(complete_handler::<R, P>),
        )
        .route(
            "/api/v1/trainers/:trainer_id/payouts",
            get(trainer_payouts_handler::<R, P>),
        )
        .route(
            "/api/v1/trainers/:trainer_id/payouts/statement.csv",
            get(statement_handler::<R, P>),
        )
        .with_state(state)
}

pub(crate) async fn create_handler<R, P>(
    State(state): State<PayoutRouterState<R, P>>,
    axum::Json(payout): axum::Json<NewPayout>,
) -> Response
where
    R: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    if !state.access.may_administer(payout.actor) {
        return forbidden_response();
    }

    match state.service.create(payout) {
        Ok(view) => (StatusCode::CREATED, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn complete_handler<R, P>(
    State(state): State<PayoutRouterState<R, P>>,
    Path(payout_id): Path<i64>,
    axum::Json(command): axum::Json<CompletePayout>,
) -> Response
where
    R: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    if !state.access.may_administer(command.actor) {
        return forbidden_response();
    }

    match state.service.complete(PayoutId(payout_id), command) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, P>(
    State(state): State<PayoutRouterState<R, P>>,
    Path(payout_id): Path<i64>,
) -> Response
where
    R: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    match state.service.get(PayoutId(payout_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn trainer_payouts_handler<R, P>(
    State(state): State<PayoutRouterState<R, P>>,
    Path(trainer_id): Path<i64>,
) -> Response
where
    R: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    match state.service.statement(TrainerId(trainer_id)) {
        Ok(records) => {
            let views: Vec<_> = records.iter().map(|record| record.status_view()).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn statement_handler<R, P>(
    State(state): State<PayoutRouterState<R, P>>,
    Path(trainer_id): Path<i64>,
) -> Response
where
    R: PayoutRepository + 'static,
    P: AccessPolicy + 'static,
{
    let records = match state.service.statement(TrainerId(trainer_id)) {
        Ok(records) => records,
        Err(error) => return error_response(error),
    };

    match export::statement_to_string(&records) {
        Ok(body) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(error) => {
            let payload = json!({ "error": format!("statement export error: {error}") });
            (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
        }
    }
}

fn forbidden_response() -> Response {
    let payload = json!({ "error": "operator may not perform administrative actions" });
    (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
}

fn error_response(error: PayoutServiceError) -> Response {
    let status = match &error {
        PayoutServiceError::NegativeAmount(_) => StatusCode::UNPROCESSABLE_ENTITY,
        PayoutServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        PayoutServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
