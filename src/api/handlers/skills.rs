//! Skill add/delete endpoints.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::profile_error;
use super::types::SkillBody;
use crate::account::AccountService;

#[utoipa::path(
    put,
    path = "/addskill",
    request_body = SkillBody,
    responses(
        (status = 200, description = "Skill added, returns the updated list", body = [String]),
        (status = 400, description = "Skill already exists", body = String),
        (status = 404, description = "Unknown or unauthenticated user", body = String),
    ),
    tag = "skills"
)]
#[instrument(skip(service, payload))]
pub async fn add_skill(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<SkillBody>>,
) -> impl IntoResponse {
    let body: SkillBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service.add_skill(&body.username, &body.skill).await {
        Ok(skills) => (
            StatusCode::OK,
            Json(json!({
                "message": "Skill added successfully",
                "skills": skills,
            })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}

#[utoipa::path(
    delete,
    path = "/deleteskill",
    request_body = SkillBody,
    responses(
        (status = 200, description = "Skill removed, returns the updated list", body = [String]),
        (status = 404, description = "Unknown user or skill", body = String),
    ),
    tag = "skills"
)]
#[instrument(skip(service, payload))]
pub async fn delete_skill(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<SkillBody>>,
) -> impl IntoResponse {
    let body: SkillBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing payload" })),
            )
                .into_response()
        }
    };

    match service.delete_skill(&body.username, &body.skill).await {
        Ok(skills) => (
            StatusCode::OK,
            Json(json!({
                "message": "Skill deleted successfully",
                "skills": skills,
            })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}
