//! Session extractor.
//!
//! Identity management is external: an auth provider in front of this API
//! issues each signed-in user a stable opaque identifier. Requests carry
//! it in one of:
//! - `Authorization: Bearer <uid>` header
//! - `X-User-Id: <uid>` header
//!
//! Extraction builds the explicit [`SessionContext`] handed to every
//! service call; a request with no identifier is rejected here with 401
//! and never reaches service code.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use bookme_core::session::SessionContext;
use bookme_types::user::UserId;

use crate::http::error::AppError;
use crate::state::AppState;

/// Authenticated session for the current request.
pub struct Session(pub SessionContext);

impl FromRequestParts<AppState> for Session {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let uid = extract_user_id(parts)?;
        Ok(Session(SessionContext::new(UserId::new(uid))))
    }
}

/// Extract the caller's user identifier from request headers.
fn extract_user_id(parts: &Parts) -> Result<String, AppError> {
    // Try Authorization: Bearer <uid>
    if let Some(auth) = parts.headers.get("authorization") {
        let auth_str = auth.to_str().map_err(|_| {
            AppError::Unauthorized("Invalid Authorization header encoding".to_string())
        })?;
        if let Some(uid) = auth_str.strip_prefix("Bearer ") {
            let uid = uid.trim();
            if !uid.is_empty() {
                return Ok(uid.to_string());
            }
        }
    }

    // Try X-User-Id header
    if let Some(uid) = parts.headers.get("x-user-id") {
        let uid_str = uid
            .to_str()
            .map_err(|_| AppError::Unauthorized("Invalid X-User-Id header encoding".to_string()))?;
        let uid_str = uid_str.trim();
        if !uid_str.is_empty() {
            return Ok(uid_str.to_string());
        }
    }

    Err(AppError::Unauthorized(
        "Not authenticated. Provide an identity via 'Authorization: Bearer <uid>' or 'X-User-Id: <uid>' header.".to_string(),
    ))
}
