//! Predefined-skill catalog endpoints.
//!
//! Reading the catalog is public; curation requires a bearer token
//! resolving to an admin account. Unauthorized callers get 404, not
//! 403, so the routes reveal nothing about accounts or roles.

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::types::{AdoptSkillsBody, RetireSkillsBody};
use super::{bearer_token, profile_error};
use crate::account::AccountService;

#[utoipa::path(
    get,
    path = "/skills",
    responses(
        (status = 200, description = "The predefined skill catalog", body = [String]),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "skills"
)]
#[instrument(skip(service))]
pub async fn predefined_skills(service: Extension<Arc<AccountService>>) -> impl IntoResponse {
    match service.predefined_skills().await {
        Ok(skills) => (
            StatusCode::OK,
            Json(json!({ "predefinedSkills": skills })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}

#[utoipa::path(
    put,
    path = "/admin/skills/invalid",
    request_body = RetireSkillsBody,
    responses(
        (status = 200, description = "Skills removed from the catalog and all accounts", body = [String]),
        (status = 404, description = "Caller is not an admin", body = String),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "skills"
)]
#[instrument(skip(service, headers, payload))]
pub async fn retire_skills(
    headers: HeaderMap,
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<RetireSkillsBody>>,
) -> impl IntoResponse {
    let body: RetireSkillsBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing payload" })),
            )
                .into_response()
        }
    };

    let Some(token) = bearer_token(&headers) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Invalid user" })),
        )
            .into_response();
    };

    match service.retire_skills(token, &body.invalid_skills).await {
        Ok(catalog) => (
            StatusCode::OK,
            Json(json!({ "predefinedSkills": catalog })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}

#[utoipa::path(
    put,
    path = "/admin/skills/new",
    request_body = AdoptSkillsBody,
    responses(
        (status = 200, description = "Skills merged into the catalog", body = [String]),
        (status = 404, description = "Caller is not an admin", body = String),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "skills"
)]
#[instrument(skip(service, headers, payload))]
pub async fn adopt_skills(
    headers: HeaderMap,
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<AdoptSkillsBody>>,
) -> impl IntoResponse {
    let body: AdoptSkillsBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing payload" })),
            )
                .into_response()
        }
    };

    let Some(token) = bearer_token(&headers) else {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Invalid user" })),
        )
            .into_response();
    };

    match service.adopt_skills(token, &body.new_skills).await {
        Ok(catalog) => (
            StatusCode::OK,
            Json(json!({ "predefinedSkills": catalog })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}
