//! Availability template handlers.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use bookme_types::error::ProfileError;
use bookme_types::profile::{Slot, Weekday};

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// One slot as submitted over the wire: the day as its lowercase literal,
/// the time as a free-form label.
#[derive(Debug, Deserialize)]
pub struct SlotInput {
    pub day: String,
    pub time: String,
}

/// Body for POST /api/v1/me/availability/slots.
#[derive(Debug, Deserialize)]
pub struct AddSlotsRequest {
    pub slots: Vec<SlotInput>,
}

/// Body for DELETE /api/v1/me/availability/slots.
#[derive(Debug, Deserialize)]
pub struct RemoveSlotRequest {
    pub day: String,
    pub time: String,
}

/// GET /api/v1/me/availability - The caller's recurring weekly template.
pub async fn get_availability(
    State(state): State<AppState>,
    Session(ctx): Session,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let profile = state.profile_service.get(&ctx.user_id).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let template_json = serde_json::to_value(&profile.availability).unwrap();
    let resp = ApiResponse::success(template_json, request_id, elapsed)
        .with_link("self", "/api/v1/me/availability")
        .with_link("slots", "/api/v1/me/availability/slots");

    Ok(Json(resp))
}

/// POST /api/v1/me/availability/slots - Stage and commit slots onto the
/// caller's template in one merge-write.
///
/// Entries with an unrecognized day literal are skipped silently, matching
/// the editor's treatment of blank time labels. Returns the template as
/// persisted.
pub async fn add_slots(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<AddSlotsRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let slots: Vec<Slot> = body
        .slots
        .into_iter()
        .filter_map(|s| match s.day.parse::<Weekday>() {
            Ok(day) => Some(Slot::new(day, s.time)),
            Err(_) => {
                tracing::debug!(day = %s.day, "skipping slot with unrecognized day");
                None
            }
        })
        .collect();

    let template = state.profile_service.add_slots(&ctx, slots).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let template_json = serde_json::to_value(&template).unwrap();
    let resp = ApiResponse::success(template_json, request_id, elapsed)
        .with_link("self", "/api/v1/me/availability/slots");

    Ok(Json(resp))
}

/// DELETE /api/v1/me/availability/slots - Remove one slot from the
/// caller's persisted template.
///
/// Removal is addressed at a specific slot, so the day must parse. A slot
/// that is not on the template is a no-op.
pub async fn remove_slot(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<RemoveSlotRequest>,
) -> Result<Json<ApiResponse<serde_json::Value>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let day = body
        .day
        .parse::<Weekday>()
        .map_err(|_| ProfileError::InvalidDay(body.day.clone()))?;

    let template = state
        .profile_service
        .remove_slot(&ctx, day, &body.time)
        .await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let template_json = serde_json::to_value(&template).unwrap();
    let resp = ApiResponse::success(template_json, request_id, elapsed)
        .with_link("self", "/api/v1/me/availability/slots");

    Ok(Json(resp))
}
