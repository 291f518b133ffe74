//! Booking transaction and inbox reader.
//!
//! `submit` turns a set of selected slots into durable booking records
//! visible from both sides: each slot becomes one record in the global log
//! and one copy in the provider's inbox, sharing an identifier. The
//! selection is deliberately not checked against the provider's current
//! template and duplicates are not rejected -- a booking is a reservation
//! request the provider reconciles manually (flagged for product
//! clarification, preserved as-is here).

use chrono::Utc;

use bookme_types::booking::{BookingRecord, NewBooking, ReceivedBooking};
use bookme_types::error::BookingError;
use bookme_types::profile::Slot;
use bookme_types::user::UserId;

use crate::repository::booking::BookingRepository;
use crate::repository::profile::ProfileRepository;
use crate::session::SessionContext;

/// Display name used when a requester's profile is missing or nameless.
const UNKNOWN_REQUESTER: &str = "Unknown";

/// Service over the booking log and per-provider inboxes.
pub struct BookingService<B: BookingRepository, P: ProfileRepository> {
    bookings: B,
    profiles: P,
}

impl<B: BookingRepository, P: ProfileRepository> BookingService<B, P> {
    pub fn new(bookings: B, profiles: P) -> Self {
        Self { bookings, profiles }
    }

    /// Submit a booking for each selected slot on the target provider.
    ///
    /// Slots are written sequentially and independently: a failure at slot
    /// N is reported as one aggregate error, but slots 1..N-1 stay written
    /// (no cross-slot rollback). The per-slot log/inbox pair is atomic at
    /// the repository level. An empty selection is a silent no-op.
    /// Self-booking is not rejected.
    pub async fn submit(
        &self,
        ctx: &SessionContext,
        provider: &UserId,
        slots: Vec<Slot>,
    ) -> Result<Vec<BookingRecord>, BookingError> {
        if slots.is_empty() {
            tracing::debug!(requester = %ctx.user_id, "booking submission with no slots, ignoring");
            return Ok(Vec::new());
        }

        let total = slots.len();
        let mut written = Vec::with_capacity(total);

        for (index, slot) in slots.into_iter().enumerate() {
            let booking = NewBooking {
                from_user: ctx.user_id.clone(),
                to_user: provider.clone(),
                day: slot.day,
                time: slot.time,
                created_at: Utc::now(),
            };

            match self.bookings.create(&booking).await {
                Ok(record) => {
                    tracing::debug!(id = %record.id, day = %record.day, time = %record.time, "booking written");
                    written.push(record);
                }
                Err(e) => {
                    tracing::warn!(
                        requester = %ctx.user_id,
                        provider = %provider,
                        error = %e,
                        "booking submission failed mid-way"
                    );
                    return Err(BookingError::StorageError(format!(
                        "slot {} of {total} failed: {e} ({} slot(s) already written)",
                        index + 1,
                        written.len(),
                    )));
                }
            }
        }

        Ok(written)
    }

    /// The caller's received bookings, each joined with the requester's
    /// display name. One profile lookup per record; fine at this scale.
    pub async fn list_received(
        &self,
        ctx: &SessionContext,
    ) -> Result<Vec<ReceivedBooking>, BookingError> {
        let records = self
            .bookings
            .list_inbox(&ctx.user_id)
            .await
            .map_err(|e| BookingError::StorageError(e.to_string()))?;

        let mut enriched = Vec::with_capacity(records.len());
        for record in records {
            let from_user_name = self
                .profiles
                .load(&record.from_user)
                .await
                .map_err(|e| BookingError::StorageError(e.to_string()))?
                .and_then(|p| p.display_name)
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| UNKNOWN_REQUESTER.to_string());

            enriched.push(ReceivedBooking {
                id: record.id,
                from_user: record.from_user,
                from_user_name,
                day: record.day,
                time: record.time,
                created_at: record.created_at,
            });
        }

        Ok(enriched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::{InMemoryBookingRepository, InMemoryProfileRepository};
    use bookme_types::profile::{Profile, Weekday};

    fn requester() -> SessionContext {
        SessionContext::new(UserId::new("requester"))
    }

    fn provider() -> UserId {
        UserId::new("provider")
    }

    fn service() -> BookingService<InMemoryBookingRepository, InMemoryProfileRepository> {
        BookingService::new(
            InMemoryBookingRepository::new(),
            InMemoryProfileRepository::new(),
        )
    }

    #[tokio::test]
    async fn test_submit_writes_log_and_inbox_with_shared_id() {
        let bookings = InMemoryBookingRepository::new();
        let profiles = InMemoryProfileRepository::new();
        let service = BookingService::new(bookings, profiles);

        let records = service
            .submit(
                &requester(),
                &provider(),
                vec![Slot::new(Weekday::Monday, "10:00")],
            )
            .await
            .unwrap();
        assert_eq!(records.len(), 1);

        let log = service.bookings.log_records();
        let inbox = service.bookings.inbox_records(&provider());
        assert_eq!(log.len(), 1);
        assert_eq!(inbox.len(), 1);
        assert_eq!(log[0].id, inbox[0].id);
        assert_eq!(log[0].from_user.as_str(), "requester");
        assert_eq!(log[0].to_user.as_str(), "provider");
        assert_eq!(log[0].day, Weekday::Monday);
        assert_eq!(log[0].time, "10:00");
    }

    #[tokio::test]
    async fn test_submit_empty_selection_is_silent_noop() {
        let service = service();
        let records = service
            .submit(&requester(), &provider(), Vec::new())
            .await
            .unwrap();
        assert!(records.is_empty());
        assert!(service.bookings.log_records().is_empty());
    }

    #[tokio::test]
    async fn test_submit_does_not_check_provider_template() {
        // Provider's template is empty -- the slot was "removed" -- yet the
        // booking still goes through.
        let service = service();
        service.profiles.insert(Profile::empty(provider()));

        let records = service
            .submit(
                &requester(),
                &provider(),
                vec![Slot::new(Weekday::Sunday, "23:00")],
            )
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_submit_partial_failure_keeps_earlier_slots() {
        let bookings = InMemoryBookingRepository::new();
        bookings.fail_after(2);
        let service = BookingService::new(bookings, InMemoryProfileRepository::new());

        let err = service
            .submit(
                &requester(),
                &provider(),
                vec![
                    Slot::new(Weekday::Monday, "10:00"),
                    Slot::new(Weekday::Monday, "11:00"),
                    Slot::new(Weekday::Monday, "12:00"),
                ],
            )
            .await
            .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("slot 3 of 3"), "got: {message}");

        // The first two slots stay written
        assert_eq!(service.bookings.log_records().len(), 2);
        assert_eq!(service.bookings.inbox_records(&provider()).len(), 2);
    }

    #[tokio::test]
    async fn test_submit_to_self_is_allowed() {
        let service = service();
        let ctx = requester();
        let records = service
            .submit(
                &ctx,
                &ctx.user_id,
                vec![Slot::new(Weekday::Monday, "10:00")],
            )
            .await
            .unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].from_user, records[0].to_user);
    }

    #[tokio::test]
    async fn test_list_received_empty_inbox() {
        let service = service();
        let inbox = service
            .list_received(&SessionContext::new(provider()))
            .await
            .unwrap();
        assert!(inbox.is_empty());
    }

    #[tokio::test]
    async fn test_list_received_joins_requester_name() {
        let service = service();
        let mut profile = Profile::empty(UserId::new("requester"));
        profile.display_name = Some("Ada".to_string());
        service.profiles.insert(profile);

        service
            .submit(
                &requester(),
                &provider(),
                vec![Slot::new(Weekday::Tuesday, "14:00")],
            )
            .await
            .unwrap();

        let inbox = service
            .list_received(&SessionContext::new(provider()))
            .await
            .unwrap();
        assert_eq!(inbox.len(), 1);
        assert_eq!(inbox[0].from_user_name, "Ada");
        assert_eq!(inbox[0].day, Weekday::Tuesday);
    }

    #[tokio::test]
    async fn test_list_received_unknown_requester_fallback() {
        let service = service();

        // No profile saved for the requester at all
        service
            .submit(
                &requester(),
                &provider(),
                vec![Slot::new(Weekday::Monday, "10:00")],
            )
            .await
            .unwrap();

        // Nameless profile for a second requester
        service.profiles.insert(Profile::empty(UserId::new("quiet")));
        service
            .submit(
                &SessionContext::new(UserId::new("quiet")),
                &provider(),
                vec![Slot::new(Weekday::Monday, "11:00")],
            )
            .await
            .unwrap();

        let inbox = service
            .list_received(&SessionContext::new(provider()))
            .await
            .unwrap();
        assert_eq!(inbox.len(), 2);
        assert!(inbox.iter().all(|b| b.from_user_name == "Unknown"));
    }
}
