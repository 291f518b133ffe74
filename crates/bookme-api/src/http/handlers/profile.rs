//! Profile handlers: signup, provider browsing, profile editing.

use std::time::Instant;

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;

use bookme_types::profile::ServiceMetadata;
use bookme_types::user::UserId;

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body for POST /api/v1/signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email: String,
}

/// Body for PUT /api/v1/me/profile.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub display_name: Option<String>,
    pub metadata: Option<ServiceMetadata>,
}

/// POST /api/v1/signup - Create the caller's empty profile document.
///
/// Idempotent: repeating the call returns the existing profile untouched.
pub async fn signup(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<SignupRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let profile = state.profile_service.register(&ctx, &body.email).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let profile_json = serde_json::to_value(&profile).unwrap();
    let resp = ApiResponse::success(profile_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/providers/{}", profile.uid))
        .with_link("profile", "/api/v1/me/profile");

    Ok(Json(resp))
}

/// GET /api/v1/providers - List every provider profile.
pub async fn list_providers(
    State(state): State<AppState>,
    Session(_ctx): Session,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let providers = state.profile_service.list().await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let providers_json: Vec<serde_json::Value> = providers
        .iter()
        .map(|p| serde_json::to_value(p).unwrap())
        .collect();

    let resp = ApiResponse::success(providers_json, request_id, elapsed)
        .with_link("self", "/api/v1/providers");

    Ok(Json(resp))
}

/// GET /api/v1/providers/:id - Fetch one provider profile.
///
/// Unknown ids resolve to a default-empty profile rather than 404; the
/// booking screen renders the same way either way.
pub async fn get_provider(
    State(state): State<AppState>,
    Session(_ctx): Session,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let profile = state.profile_service.get(&UserId::new(id)).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let profile_json = serde_json::to_value(&profile).unwrap();
    let resp = ApiResponse::success(profile_json, request_id, elapsed)
        .with_link("self", &format!("/api/v1/providers/{}", profile.uid))
        .with_link("book", "/api/v1/bookings");

    Ok(Json(resp))
}

/// PUT /api/v1/me/profile - Patch the caller's display name and metadata.
///
/// Merge semantics: omitted fields keep their stored values. A body with
/// neither field is accepted and changes nothing.
pub async fn update_profile(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<UpdateProfileRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let profile = state
        .profile_service
        .update_profile(&ctx, body.display_name, body.metadata)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let profile_json = serde_json::to_value(&profile).unwrap();
    let resp = ApiResponse::success(profile_json, request_id, elapsed)
        .with_link("self", "/api/v1/me/profile");

    Ok(Json(resp))
}
