use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{ComplianceRequestCommand, TrainerId, VerificationUpdate};
use super::notices::NoticeMailer;
use super::repository::{RepositoryError, TrainerRepository};
use super::service::{ComplianceServiceError, TrainerComplianceService};
use crate::workflows::access::AccessPolicy;

/// Shared state for the compliance endpoints: the service plus the boundary
/// capability check.
pub struct ComplianceRouterState<R, M, P> {
    pub service: Arc<TrainerComplianceService<R, M>>,
    pub access: Arc<P>,
}

impl<R, M, P> Clone for ComplianceRouterState<R, M, P> {
    fn clone(&self) -> Self {
        Self {
            service: self.service.clone(),
            access: self.access.clone(),
        }
    }
}

const DEFAULT_OUTSTANDING_LIMIT: usize = 50;

#[derive(Debug, Default, Deserialize)]
pub(crate) struct OutstandingQuery {
    limit: Option<usize>,
}

/// Router builder exposing HTTP endpoints for the compliance workflow.
pub fn compliance_router<R, M, P>(state: ComplianceRouterState<R, M, P>) -> Router
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
    P: AccessPolicy + 'static,
{
    Router::new()
        .route(
            "/api/v1/trainers/unverified",
            get(outstanding_handler::<R, M, P>),
        )
        .route(
            "/api/v1/trainers/:trainer_id/compliance",
            get(status_handler::<R, M, P>),
        )
        .route(
            "/api/v1/trainers/:trainer_id/compliance/requests",
            post(request_handler::<R, M, P>),
        )
        .route(
            "/api/v1/trainers/:trainer_id/verification",
            post(verification_handler::<R, M, P>),
        )
        .with_state(state)
}

pub(crate) async fn request_handler<R, M, P>(
    State(state): State<ComplianceRouterState<R, M, P>>,
    Path(trainer_id): Path<i64>,
    axum::Json(command): axum::Json<ComplianceRequestCommand>,
) -> Response
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
    P: AccessPolicy + 'static,
{
    if !state.access.may_administer(command.actor) {
        return forbidden_response();
    }

    match state
        .service
        .request_document(TrainerId(trainer_id), command.document, command.actor)
    {
        Ok(receipt) => {
            let payload = json!({
                "message": receipt.confirmation(),
                "receipt": receipt,
            });
            (StatusCode::ACCEPTED, axum::Json(payload)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn verification_handler<R, M, P>(
    State(state): State<ComplianceRouterState<R, M, P>>,
    Path(trainer_id): Path<i64>,
    axum::Json(update): axum::Json<VerificationUpdate>,
) -> Response
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
    P: AccessPolicy + 'static,
{
    if !state.access.may_administer(update.actor) {
        return forbidden_response();
    }

    match state.service.mark_verified(TrainerId(trainer_id), update) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn status_handler<R, M, P>(
    State(state): State<ComplianceRouterState<R, M, P>>,
    Path(trainer_id): Path<i64>,
) -> Response
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
    P: AccessPolicy + 'static,
{
    match state.service.compliance_view(TrainerId(trainer_id)) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn outstanding_handler<R, M, P>(
    State(state): State<ComplianceRouterState<R, M, P>>,
    Query(query): Query<OutstandingQuery>,
) -> Response
where
    R: TrainerRepository + 'static,
    M: NoticeMailer + 'static,
    P: AccessPolicy + 'static,
{
    let limit = query.limit.unwrap_or(DEFAULT_OUTSTANDING_LIMIT);
    match state.service.outstanding(limit) {
        Ok(views) => (StatusCode::OK, axum::Json(views)).into_response(),
        Err(error) => error_response(error),
    }
}

fn forbidden_response() -> Response {
    let payload = json!({ "error": "operator may not perform administrative actions" });
    (StatusCode::FORBIDDEN, axum::Json(payload)).into_response()
}

fn error_response(error: ComplianceServiceError) -> Response {
    let status = match &error {
        ComplianceServiceError::Repository(RepositoryError::NotFound)
        | ComplianceServiceError::NoContactAddress(_) => StatusCode::NOT_FOUND,
        ComplianceServiceError::Delivery(_) => StatusCode::BAD_GATEWAY,
        ComplianceServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}
