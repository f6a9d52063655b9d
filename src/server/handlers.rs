use crate::model::{FetchError, ProfileRequest, ProfileStats};
use crate::server::AppState;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::{error, warn};

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, detail: impl Into<String>) -> ApiError {
    (status, Json(ErrorResponse { detail: detail.into() }))
}

pub fn status_for(err: &FetchError) -> StatusCode {
    match err {
        FetchError::NotFound(_) => StatusCode::NOT_FOUND,
        FetchError::Timeout => StatusCode::GATEWAY_TIMEOUT,
        FetchError::Upstream { .. } => StatusCode::BAD_GATEWAY,
        FetchError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

#[derive(Debug, Serialize)]
pub struct RootResponse {
    pub message: &'static str,
}

pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Coding Progress Dashboard API",
    })
}

pub async fn profile_stats(
    State(state): State<AppState>,
    payload: Result<Json<ProfileRequest>, JsonRejection>,
) -> Result<Json<ProfileStats>, ApiError> {
    let Json(req) = payload.map_err(|rejection| {
        warn!("Rejected stats request: {}", rejection.body_text());
        api_error(rejection.status(), rejection.body_text())
    })?;
    let Some(username) = req.username() else {
        return Err(api_error(StatusCode::BAD_REQUEST, "Username must not be empty"));
    };

    match state.source.fetch(username).await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            let status = status_for(&e);
            if status.is_server_error() {
                error!("Stats request for '{}' failed: {}", username, e);
            }
            Err(api_error(status, e.to_string()))
        }
    }
}
