//! OTP confirmation endpoints for registration and password reset.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::lifecycle_error;
use super::types::{AccountResponse, VerifyBody};
use crate::account::AccountService;

#[utoipa::path(
    post,
    path = "/verify",
    request_body = VerifyBody,
    responses(
        (status = 200, description = "User verified", body = AccountResponse),
        (status = 400, description = "Unknown or consumed OTP", body = String),
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn verify(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<VerifyBody>>,
) -> impl IntoResponse {
    let body: VerifyBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service.verify(&body.otp).await {
        Ok(account) => (
            StatusCode::OK,
            Json(json!({
                "message": "User verified successfully",
                "user": AccountResponse::from(account),
            })),
        )
            .into_response(),
        Err(err) => lifecycle_error(&err),
    }
}

#[utoipa::path(
    post,
    path = "/verifyForgotPassword",
    request_body = VerifyBody,
    responses(
        (status = 200, description = "Reset OTP confirmed"),
        (status = 400, description = "Unknown or consumed OTP", body = String),
    ),
    tag = "accounts"
)]
#[instrument(skip(service, payload))]
pub async fn verify_forgot_password(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<VerifyBody>>,
) -> impl IntoResponse {
    let body: VerifyBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "message": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service.verify_forgot_password(&body.otp).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "message": "OTP verified successfully" })),
        )
            .into_response(),
        Err(err) => lifecycle_error(&err),
    }
}
