//! School portal server.
//!
//! Browser-facing portal for a school-management platform. Business
//! logic, persistence and authorization live in an external backend;
//! this server relays authenticated requests to it and assembles the
//! JSON view models the portal pages render.

mod api;
mod auth;
mod backend;
mod config;
mod errors;
mod flow;
mod forms;
mod models;
mod pages;
mod stores;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{any, delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use backend::{BackendApi, HttpBackend};
use config::Config;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn BackendApi>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting school portal server");
    tracing::info!("Backend URL: {}", config.backend_url);
    tracing::info!("Bind address: {}", config.bind_addr);

    let backend = Arc::new(HttpBackend::new(&config)?);

    let state = AppState {
        backend,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Proxy routes: thin relays to the backend. Each handler requires the
    // session cookie itself; login is the one way in without it.
    let proxy_routes = Router::new()
        .route("/login", post(api::login))
        .route("/logout", post(api::logout))
        .route("/verify-token", get(api::verify_token))
        .route("/personal-data", get(api::get_personal_data))
        .route("/public-personal-data", get(api::get_public_personal_data))
        .route("/role", get(api::get_role))
        .route(
            "/profile-pictures",
            get(api::get_profile_picture).post(api::upload_profile_picture),
        )
        .route("/courses", get(api::list_courses))
        .route("/courses/{id}", get(api::get_course))
        .route("/students", get(api::list_students))
        .route("/subjects", get(api::list_subjects))
        .route("/timetables", get(api::list_timetables))
        .route(
            "/assessments",
            get(api::list_assessments).post(api::create_assessment),
        )
        .route(
            "/selfassessables",
            get(api::list_selfassessables).post(api::submit_selfassessable),
        )
        .route(
            "/get-if-selfassessable-answered",
            post(api::get_if_selfassessable_answered),
        )
        .route("/grades", get(api::list_grades).post(api::create_grade))
        .route(
            "/grades/{id}",
            put(api::update_grade).delete(api::delete_grade),
        )
        .route(
            "/subject-messages",
            get(api::list_subject_messages).post(api::create_subject_message),
        )
        .route("/subject-messages/{id}", delete(api::delete_subject_message))
        .route("/messages", get(api::list_messages).post(api::create_message))
        // Anything else falls through to the generic relay
        .route("/{*path}", any(api::relay_any));

    // Page routes: aggregated view models behind the session guard.
    let page_routes = Router::new()
        .route("/dashboard", get(pages::dashboard_page))
        .route("/dashboard/actions", post(pages::submit_action))
        .route("/subjects", get(pages::subjects_page))
        .route("/grades", get(pages::grades_page))
        .route("/exams", get(pages::exams_page))
        .route("/timetable", get(pages::timetable_page))
        .route("/messages", get(pages::messages_page))
        .route("/profile", get(pages::profile_page))
        .layer(middleware::from_fn(auth::require_session));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api/proxy", proxy_routes)
        .nest("/pages", page_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
