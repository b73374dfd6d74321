//! Education and work-experience endpoints.
//!
//! Add and update share the upsert semantics: entries are keyed by
//! institution (education) or id (work experience), so both routes land
//! on the same service call.

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use std::sync::Arc;
use tracing::instrument;

use super::profile_error;
use super::types::{EducationBody, WorkExperienceBody};
use crate::account::AccountService;

#[utoipa::path(
    post,
    path = "/addeducation",
    request_body = EducationBody,
    responses(
        (status = 200, description = "Education entry stored", body = String),
        (status = 404, description = "Unknown or unauthenticated user", body = String),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "profile"
)]
#[instrument(skip(service, payload))]
pub async fn add_education(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<EducationBody>>,
) -> impl IntoResponse {
    upsert_education(service, payload).await
}

#[utoipa::path(
    put,
    path = "/updateeducation",
    request_body = EducationBody,
    responses(
        (status = 200, description = "Education entry stored", body = String),
        (status = 404, description = "Unknown or unauthenticated user", body = String),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "profile"
)]
#[instrument(skip(service, payload))]
pub async fn update_education(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<EducationBody>>,
) -> impl IntoResponse {
    upsert_education(service, payload).await
}

async fn upsert_education(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<EducationBody>>,
) -> axum::response::Response {
    let body: EducationBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing payload" })),
            )
                .into_response()
        }
    };

    let (username, entry) = body.into_entry();
    match service.upsert_education(&username, entry).await {
        Ok(education) => (
            StatusCode::OK,
            Json(json!({
                "message": "Education saved successfully",
                "education": education,
            })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}

#[utoipa::path(
    post,
    path = "/addwork",
    request_body = WorkExperienceBody,
    responses(
        (status = 200, description = "Work experience stored", body = String),
        (status = 404, description = "Unknown or unauthenticated user", body = String),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "profile"
)]
#[instrument(skip(service, payload))]
pub async fn add_work(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<WorkExperienceBody>>,
) -> impl IntoResponse {
    upsert_work(service, payload).await
}

#[utoipa::path(
    put,
    path = "/updatework",
    request_body = WorkExperienceBody,
    responses(
        (status = 200, description = "Work experience stored", body = String),
        (status = 404, description = "Unknown or unauthenticated user", body = String),
        (status = 500, description = "Server error", body = String),
    ),
    tag = "profile"
)]
#[instrument(skip(service, payload))]
pub async fn update_work(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<WorkExperienceBody>>,
) -> impl IntoResponse {
    upsert_work(service, payload).await
}

async fn upsert_work(
    service: Extension<Arc<AccountService>>,
    payload: Option<Json<WorkExperienceBody>>,
) -> axum::response::Response {
    let body: WorkExperienceBody = match payload {
        Some(Json(payload)) => payload,
        None => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Missing payload" })),
            )
                .into_response()
        }
    };

    let (username, entry) = body.into_entry();
    match service.upsert_work_experience(&username, entry).await {
        Ok(work_experiences) => (
            StatusCode::OK,
            Json(json!({
                "message": "Work experience saved successfully",
                "workExperiences": work_experiences,
            })),
        )
            .into_response(),
        Err(err) => profile_error(&err),
    }
}
