use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use std::fmt;
use std::str::FromStr;

use crate::profile::Weekday;
use crate::user::UserId;

/// Unique identifier for a booking, wrapping a UUID v7 (time-sortable).
///
/// Assigned by the store at creation and shared by both stored copies of
/// the record (global log and provider inbox).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BookingId(pub Uuid);

impl BookingId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl Default for BookingId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookingId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// A confirmed slot reservation, written once and never mutated.
///
/// The `day` and `time` are snapshots of the selection at booking time;
/// they are deliberately not re-validated against the provider's current
/// template, so a record may reference a slot the provider has since
/// removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub from_user: UserId,
    pub to_user: UserId,
    pub day: Weekday,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

/// Booking fields as submitted, before the store assigns an identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBooking {
    pub from_user: UserId,
    pub to_user: UserId,
    pub day: Weekday,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl NewBooking {
    /// Attach a store-assigned identifier, producing the durable record.
    pub fn into_record(self, id: BookingId) -> BookingRecord {
        BookingRecord {
            id,
            from_user: self.from_user,
            to_user: self.to_user,
            day: self.day,
            time: self.time,
            created_at: self.created_at,
        }
    }
}

/// Display-ready view of one received booking: the record joined with the
/// requester's display name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivedBooking {
    pub id: BookingId,
    pub from_user: UserId,
    /// Requester's display name, or "Unknown" when their profile is
    /// missing or has no name set.
    pub from_user_name: String,
    pub day: Weekday,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_booking_id_roundtrip() {
        let id = BookingId::new();
        let s = id.to_string();
        let parsed: BookingId = s.parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_booking_ids_time_sortable() {
        let a = BookingId::new();
        let b = BookingId::new();
        // UUID v7 is time-ordered; two sequential ids never collide
        assert_ne!(a, b);
    }

    #[test]
    fn test_new_booking_into_record_keeps_fields() {
        let now = Utc::now();
        let new = NewBooking {
            from_user: UserId::new("requester"),
            to_user: UserId::new("provider"),
            day: Weekday::Monday,
            time: "10:00".to_string(),
            created_at: now,
        };
        let id = BookingId::new();
        let record = new.into_record(id.clone());
        assert_eq!(record.id, id);
        assert_eq!(record.from_user.as_str(), "requester");
        assert_eq!(record.to_user.as_str(), "provider");
        assert_eq!(record.day, Weekday::Monday);
        assert_eq!(record.time, "10:00");
        assert_eq!(record.created_at, now);
    }
}
