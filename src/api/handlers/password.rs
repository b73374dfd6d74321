//! Forgot-password and reset-password endpoints.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::lifecycle_error;
use super::types::{AccountResponse, ForgotPasswordBody, ResetPasswordBody};
use crate::account::AccountService;

#[utoipa::path(
    post,
    path = "/forgotpassword",
    request_body = ForgotPasswordBody,
    responses(
        (status = 200, description = "Reset OTP issued and mailed", body = AccountResponse),
        (status = 400, description = "Unknown username or email", body = String),
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn forgot_password(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<ForgotPasswordBody>>,
) -> impl IntoResponse {
    let body: ForgotPasswordBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service.forgot_password(&body.username_or_email).await {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({
                "message": "OTP sent for password reset",
                "user": AccountResponse::from(account),
            })),
        )
            .into_response(),
        Err(err) => lifecycle_error(&err),
    }
}

#[utoipa::path(
    put,
    path = "/resetpassword",
    request_body = ResetPasswordBody,
    responses(
        (status = 200, description = "Password replaced", body = AccountResponse),
        (status = 400, description = "Unknown user, unconfirmed OTP, or wrong existing password", body = String),
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn reset_password(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<ResetPasswordBody>>,
) -> impl IntoResponse {
    let body: ResetPasswordBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service
        .reset_password(&body.username, &body.existing_password, &body.new_password)
        .await
    {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({
                "message": "Password reset successfully",
                "user": AccountResponse::from(account),
            })),
        )
            .into_response(),
        Err(err) => lifecycle_error(&err),
    }
}
