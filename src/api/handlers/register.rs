//! Registration endpoint.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::lifecycle_error;
use super::types::{AccountResponse, RegisterBody};
use crate::account::{AccountService, RegisterRequest};

#[utoipa::path(
    post,
    path = "/register",
    request_body = RegisterBody,
    responses(
        (status = 201, description = "Registration successful", body = AccountResponse, content_type = "application/json"),
        (status = 400, description = "Validation failure or existing username/email", body = String),
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn register(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<RegisterBody>>,
) -> impl IntoResponse {
    let body: RegisterBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Missing payload" })),
            )
                .into_response()
        }
    };

    let request = RegisterRequest {
        username: body.username,
        password: body.password,
        confirm_password: body.confirm_password,
        email: body.email,
        college_name: body.college_name,
        first_name: body.first_name,
        last_name: body.last_name,
    };

    match service.register(request).await {
        Ok(account) => (
            StatusCode::CREATED,
            Json(json!({
                "message": "User registered successfully",
                "user": AccountResponse::from(account),
            })),
        )
            .into_response(),
        Err(err) => lifecycle_error(&err),
    }
}
