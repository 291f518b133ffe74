//! Booking repository trait definition.

use bookme_types::booking::{BookingRecord, NewBooking};
use bookme_types::error::RepositoryError;
use bookme_types::user::UserId;

/// Repository trait for booking persistence.
///
/// A booking is a fan-out write: one copy in the global append-only log
/// and one in the target provider's inbox, both under the same
/// store-assigned identifier. Implementations must write the pair
/// atomically so a crash can never leave a log entry without its inbox
/// counterpart. Records are never mutated or deleted.
pub trait BookingRepository: Send + Sync {
    /// Persist one booking: assign an identifier, write the log record and
    /// the inbox copy together, return the durable record.
    fn create(
        &self,
        booking: &NewBooking,
    ) -> impl std::future::Future<Output = Result<BookingRecord, RepositoryError>> + Send;

    /// All inbox records for a provider, store-native order. Each call is
    /// an independent full re-read.
    fn list_inbox(
        &self,
        owner: &UserId,
    ) -> impl std::future::Future<Output = Result<Vec<BookingRecord>, RepositoryError>> + Send;
}
