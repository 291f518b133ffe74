//! Axum router configuration with middleware.
//!
//! All routes are under `/api/v1/`. Middleware: CORS, request tracing.

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_routes = Router::new()
        // Signup / profiles
        .route("/signup", post(handlers::profile::signup))
        .route("/providers", get(handlers::profile::list_providers))
        .route("/providers/{id}", get(handlers::profile::get_provider))
        .route("/me/profile", put(handlers::profile::update_profile))
        // Availability template
        .route(
            "/me/availability",
            get(handlers::availability::get_availability),
        )
        .route(
            "/me/availability/slots",
            post(handlers::availability::add_slots),
        )
        .route(
            "/me/availability/slots",
            delete(handlers::availability::remove_slot),
        )
        // Bookings
        .route("/bookings", post(handlers::booking::create_booking))
        .route(
            "/me/received-bookings",
            get(handlers::booking::list_received_bookings),
        );

    Router::new()
        .nest("/api/v1", api_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint (no auth required).
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
