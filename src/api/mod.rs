//! Router construction and server lifecycle.

use anyhow::Result;
use axum::{
    body::Body,
    extract::MatchedPath,
    http::{HeaderName, HeaderValue, Request},
    routing::{delete, get, post, put},
    Extension, Router,
};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    cors::CorsLayer, request_id::PropagateRequestIdLayer, set_header::SetRequestHeaderLayer,
    trace::TraceLayer,
};
use tracing::{info, info_span, Span};
use ulid::Ulid;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::account::AccountService;
use crate::store::AccountStore;

pub mod handlers;
mod openapi;

pub use openapi::ApiDoc;

/// Build the application router with all routes and layers attached.
#[must_use]
pub fn app(service: Arc<AccountService>, store: Arc<dyn AccountStore>) -> Router {
    Router::new()
        .route("/register", post(handlers::register::register))
        .route("/verify", post(handlers::verify::verify))
        .route(
            "/verifyForgotPassword",
            post(handlers::verify::verify_forgot_password),
        )
        .route("/login", post(handlers::login::login))
        .route(
            "/forgotpassword",
            post(handlers::password::forgot_password),
        )
        .route("/resetpassword", put(handlers::password::reset_password))
        .route("/addskill", put(handlers::skills::add_skill))
        .route("/deleteskill", delete(handlers::skills::delete_skill))
        .route("/addeducation", post(handlers::profile::add_education))
        .route(
            "/updateeducation",
            put(handlers::profile::update_education),
        )
        .route("/addwork", post(handlers::profile::add_work))
        .route("/updatework", put(handlers::profile::update_work))
        .route("/skills", get(handlers::admin::predefined_skills))
        .route(
            "/admin/skills/invalid",
            put(handlers::admin::retire_skills),
        )
        .route("/admin/skills/new", put(handlers::admin::adopt_skills))
        .route("/health", get(handlers::health::health))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestHeaderLayer::if_not_present(
                    HeaderName::from_static("x-request-id"),
                    |_req: &_| HeaderValue::from_str(Ulid::new().to_string().as_str()).ok(),
                ))
                .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
                    "x-request-id",
                )))
                .layer(TraceLayer::new_for_http().make_span_with(make_span))
                .layer(CorsLayer::permissive())
                .layer(Extension(service))
                .layer(Extension(store)),
        )
}

/// Start the server
/// # Errors
/// Return error if failed to start the server
pub async fn serve(
    port: u16,
    service: Arc<AccountService>,
    store: Arc<dyn AccountStore>,
) -> Result<()> {
    let app = app(service, store);

    let listener = TcpListener::bind(format!("::0:{port}")).await?;

    info!("Listening on [::]:{}", port);

    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Gracefully shutdown");
        })
        .await?;

    Ok(())
}

fn make_span(request: &Request<Body>) -> Span {
    let request_id = request
        .headers()
        .get("x-request-id")
        .and_then(|val| val.to_str().ok())
        .unwrap_or("none");
    let matched_path = request
        .extensions()
        .get::<MatchedPath>()
        .map_or_else(|| request.uri().path(), MatchedPath::as_str);

    info_span!(
        "http.request",
        http.method = %request.method(),
        http.route = matched_path,
        request_id
    )
}
