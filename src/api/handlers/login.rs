//! Login endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::lifecycle_error;
use super::types::LoginBody;
use crate::account::AccountService;

#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginBody,
    responses(
        (status = 200, description = "Login successful, returns the bearer token", body = String),
        (status = 400, description = "Unknown user, wrong password, banned, or unverified", body = String),
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn login(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<LoginBody>>,
) -> impl IntoResponse {
    let body: LoginBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service.login(&body.username, &body.password).await {
        Ok(token) => (StatusCode::OK, Json(json!({ "token": token }))).into_response(),
        Err(err) => lifecycle_error(&err),
    }
}
