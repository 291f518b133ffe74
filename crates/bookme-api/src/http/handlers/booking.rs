//! Booking handlers: submission fan-out and the received inbox.

use std::time::Instant;

use axum::Json;
use axum::extract::State;
use serde::Deserialize;

use bookme_types::error::BookingError;
use bookme_types::profile::{Slot, Weekday};
use bookme_types::user::UserId;

use crate::http::error::AppError;
use crate::http::extractors::session::Session;
use crate::http::handlers::availability::SlotInput;
use crate::http::response::ApiResponse;
use crate::state::AppState;

/// Body for POST /api/v1/bookings.
#[derive(Debug, Deserialize)]
pub struct CreateBookingRequest {
    /// The provider being booked.
    pub to_user: String,
    /// Selected slots; one booking record is written per entry.
    pub slots: Vec<SlotInput>,
}

/// POST /api/v1/bookings - Book the selected slots on a provider.
///
/// Fans out to one record per slot. Unlike availability staging, a
/// malformed day here rejects the whole request: the caller picked these
/// slots off a rendered template, so a bad literal is a client bug, not
/// free-form input. An empty selection returns an empty list.
pub async fn create_booking(
    State(state): State<AppState>,
    Session(ctx): Session,
    Json(body): Json<CreateBookingRequest>,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let mut slots = Vec::with_capacity(body.slots.len());
    for input in body.slots {
        let day = input
            .day
            .parse::<Weekday>()
            .map_err(|_| BookingError::InvalidDay(input.day.clone()))?;
        slots.push(Slot::new(day, input.time));
    }

    let provider = UserId::new(body.to_user);
    let records = state.booking_service.submit(&ctx, &provider, slots).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let records_json: Vec<serde_json::Value> = records
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();

    let resp = ApiResponse::success(records_json, request_id, elapsed)
        .with_link("self", "/api/v1/bookings")
        .with_link("inbox", "/api/v1/me/received-bookings");

    Ok(Json(resp))
}

/// GET /api/v1/me/received-bookings - Bookings other users made against
/// the caller, in storage order, each joined with the requester's display
/// name ("Unknown" when they never set one).
pub async fn list_received_bookings(
    State(state): State<AppState>,
    Session(ctx): Session,
) -> Result<Json<ApiResponse<Vec<serde_json::Value>>>, AppError> {
    let start = Instant::now();
    let request_id = uuid::Uuid::now_v7().to_string();

    let received = state.booking_service.list_received(&ctx).await?;
    let elapsed = start.elapsed().as_millis() as u64;

    let received_json: Vec<serde_json::Value> = received
        .iter()
        .map(|r| serde_json::to_value(r).unwrap())
        .collect();

    let resp = ApiResponse::success(received_json, request_id, elapsed)
        .with_link("self", "/api/v1/me/received-bookings");

    Ok(Json(resp))
}
