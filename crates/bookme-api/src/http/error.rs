//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use bookme_types::error::{BookingError, ProfileError};

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Profile and availability errors.
    Profile(ProfileError),
    /// Booking errors.
    Booking(BookingError),
    /// Missing or malformed session identity.
    Unauthorized(String),
}

impl From<ProfileError> for AppError {
    fn from(e: ProfileError) -> Self {
        AppError::Profile(e)
    }
}

impl From<BookingError> for AppError {
    fn from(e: BookingError) -> Self {
        AppError::Booking(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Profile(ProfileError::InvalidDay(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Profile(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "PROFILE_ERROR", e.to_string())
            }
            AppError::Booking(BookingError::InvalidDay(msg)) => {
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
            AppError::Booking(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "BOOKING_ERROR", e.to_string())
            }
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
        };

        let body = json!({
            "data": null,
            "meta": {
                "request_id": "",
                "timestamp": chrono::Utc::now().to_rfc3339(),
                "response_time_ms": 0
            },
            "errors": [{
                "code": code,
                "message": message,
            }]
        });

        (
            status,
            [(axum::http::header::CONTENT_TYPE, "application/json")],
            body.to_string(),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_day_maps_to_bad_request() {
        let profile_err = AppError::Profile(ProfileError::InvalidDay("funday".to_string()));
        assert_eq!(profile_err.into_response().status(), StatusCode::BAD_REQUEST);

        let booking_err = AppError::Booking(BookingError::InvalidDay("funday".to_string()));
        assert_eq!(booking_err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_error_maps_to_internal() {
        let err = AppError::Profile(ProfileError::StorageError("disk full".to_string()));
        assert_eq!(
            err.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unauthorized_maps_to_401() {
        let err = AppError::Unauthorized("no identity header".to_string());
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }
}
