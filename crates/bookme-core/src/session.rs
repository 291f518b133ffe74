//! Explicit session context.
//!
//! The authenticated user's identity is carried into every operation as an
//! argument instead of living in ambient global state. Callers with no
//! identifier never construct a context; "not authenticated" is rejected
//! at the API boundary before any service code runs.

use bookme_types::user::UserId;

/// Identity of the caller for the duration of one operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub user_id: UserId,
}

impl SessionContext {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }
}
