//! OpenAPI document aggregation.

use utoipa::OpenApi;

use super::handlers::types::{
    AccountResponse, AdoptSkillsBody, EducationBody, ForgotPasswordBody, LoginBody,
    RegisterBody, ResetPasswordBody, RetireSkillsBody, SkillBody, VerifyBody,
    WorkExperienceBody,
};
use crate::account::model::{Education, WorkExperience};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::health::health,
        crate::api::handlers::register::register,
        crate::api::handlers::verify::verify,
        crate::api::handlers::verify::verify_forgot_password,
        crate::api::handlers::login::login,
        crate::api::handlers::password::forgot_password,
        crate::api::handlers::password::reset_password,
        crate::api::handlers::skills::add_skill,
        crate::api::handlers::skills::delete_skill,
        crate::api::handlers::profile::add_education,
        crate::api::handlers::profile::update_education,
        crate::api::handlers::profile::add_work,
        crate::api::handlers::profile::update_work,
        crate::api::handlers::admin::predefined_skills,
        crate::api::handlers::admin::retire_skills,
        crate::api::handlers::admin::adopt_skills,
    ),
    components(schemas(
        AccountResponse,
        AdoptSkillsBody,
        Education,
        EducationBody,
        ForgotPasswordBody,
        LoginBody,
        RegisterBody,
        ResetPasswordBody,
        RetireSkillsBody,
        SkillBody,
        VerifyBody,
        WorkExperience,
        WorkExperienceBody,
        crate::api::handlers::health::Health,
    )),
    tags(
        (name = "accounts", description = "Registration, verification, login, and password reset"),
        (name = "skills", description = "Account skills and the predefined catalog"),
        (name = "profile", description = "Education and work experience"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
