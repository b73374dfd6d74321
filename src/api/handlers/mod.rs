//! API handlers and shared utilities.
//!
//! Two error conventions, matching the route families: the account
//! lifecycle endpoints answer failures as `400 {"message"}`, the
//! profile/admin endpoints as `{"error"}` with 404 for missing
//! resources. Storage failures surface as a generic 500 in both —
//! internals never reach callers.

pub mod admin;
pub mod health;
pub mod login;
pub mod password;
pub mod profile;
pub mod register;
pub mod skills;
pub mod types;
pub mod verify;

use axum::{
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::error;

use crate::account::AccountError;

/// Map a lifecycle failure to `400 {"message"}` (500 for storage).
pub(crate) fn lifecycle_error(err: &AccountError) -> Response {
    match err {
        AccountError::Store(inner) => {
            error!("storage failure: {inner:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "message": "Server error" })),
            )
                .into_response()
        }
        other => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "message": other.to_string() })),
        )
            .into_response(),
    }
}

/// Map a profile/admin failure to `{"error"}` with 404 for missing
/// resources and 500 for storage.
pub(crate) fn profile_error(err: &AccountError) -> Response {
    match err {
        AccountError::Store(inner) => {
            error!("storage failure: {inner:?}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Server error" })),
            )
                .into_response()
        }
        AccountError::NotFound(message) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": message })),
        )
            .into_response(),
        other => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": other.to_string() })),
        )
            .into_response(),
    }
}

/// Pull the bearer token out of the Authorization header, if any.
pub(crate) fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
