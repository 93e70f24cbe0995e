//! In-process router speaking the `/api/...` routes.
//!
//! Handlers dispatch onto the store clients and answer with JSON bodies and
//! HTTP status codes. The router is driven in-process with
//! `tower::ServiceExt::oneshot`; nothing listens on a socket.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, instrument};

use crate::clients::{AnalyticsClient, UserClient};
use crate::domain::{RegistrationsDatum, UserPatch, UserRecord, UsersByRoleDatum};
use crate::user_actor::UserError;

type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
struct ApiState {
    users: UserClient,
    analytics: AnalyticsClient,
    clock: Clock,
}

/// Failure of a route, answered with a bare status code.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    BadRequest,
    #[error("User not found")]
    NotFound,
    #[error(transparent)]
    User(#[from] UserError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::BadRequest => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::User(e) => e
                .status()
                .and_then(|code| StatusCode::from_u16(code).ok())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
        };
        debug!(%status, error = %self, "Request failed");
        status.into_response()
    }
}

pub fn router(users: UserClient) -> Router {
    router_with_clock(users, Utc::now)
}

/// Uses `clock` for "now" when bucketing analytics by month.
pub fn router_with_clock<F>(users: UserClient, clock: F) -> Router
where
    F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
{
    let state = ApiState {
        analytics: AnalyticsClient::new(users.clone()),
        users,
        clock: Arc::new(clock),
    };

    Router::new()
        .route("/api/users", get(list_users))
        .route("/api/users/{id}", get(get_user).patch(patch_user))
        .route("/api/analytics/registrations", get(registrations))
        .route("/api/analytics/users-by-role", get(users_by_role))
        .with_state(state)
}

#[instrument(skip_all)]
async fn list_users(State(state): State<ApiState>) -> Result<Json<Vec<UserRecord>>, ApiError> {
    Ok(Json(state.users.fetch_users().await?))
}

#[instrument(skip_all, fields(user_id = %id))]
async fn get_user(State(state): State<ApiState>, Path(id): Path<String>) -> Result<Json<UserRecord>, ApiError> {
    state.users.get_user(id).await?.map(Json).ok_or(ApiError::NotFound)
}

/// Applies `{ roles?, status? }`. A body that is missing, malformed, or sets
/// neither field is a 400.
#[instrument(skip_all, fields(user_id = %id))]
async fn patch_user(
    State(state): State<ApiState>,
    Path(id): Path<String>,
    payload: Result<Json<UserPatch>, JsonRejection>,
) -> Result<Json<UserRecord>, ApiError> {
    let Json(patch) = payload.map_err(|e| {
        debug!(error = %e, "Rejecting patch body");
        ApiError::BadRequest
    })?;
    if patch.is_empty() {
        return Err(ApiError::BadRequest);
    }

    Ok(Json(state.users.update_user(id, patch).await?))
}

#[instrument(skip_all)]
async fn registrations(State(state): State<ApiState>) -> Result<Json<Vec<RegistrationsDatum>>, ApiError> {
    let now = (state.clock)();
    Ok(Json(state.analytics.registrations(now).await?))
}

#[instrument(skip_all)]
async fn users_by_role(State(state): State<ApiState>) -> Result<Json<Vec<UsersByRoleDatum>>, ApiError> {
    Ok(Json(state.analytics.users_by_role().await?))
}
