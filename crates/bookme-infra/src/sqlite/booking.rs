//! SQLite booking repository implementation.
//!
//! The fan-out write (global log row + provider inbox row) runs inside one
//! SQL transaction on the writer pool, so both copies land together under
//! the same identifier or not at all. Records are append-only; there is no
//! update or delete path.

use bookme_core::repository::booking::BookingRepository;
use bookme_types::booking::{BookingId, BookingRecord, NewBooking};
use bookme_types::error::RepositoryError;
use bookme_types::profile::Weekday;
use bookme_types::user::UserId;
use chrono::{DateTime, Utc};
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `BookingRepository`.
#[derive(Clone)]
pub struct SqliteBookingRepository {
    pool: DatabasePool,
}

impl SqliteBookingRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the domain BookingRecord.
struct BookingRow {
    id: String,
    from_user: String,
    to_user: String,
    day: String,
    time: String,
    created_at: String,
}

impl BookingRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            id: row.try_get("id")?,
            from_user: row.try_get("from_user")?,
            to_user: row.try_get("to_user")?,
            day: row.try_get("day")?,
            time: row.try_get("time")?,
            created_at: row.try_get("created_at")?,
        })
    }

    fn into_record(self) -> Result<BookingRecord, RepositoryError> {
        let id = self
            .id
            .parse::<BookingId>()
            .map_err(|e| RepositoryError::Query(format!("invalid booking id: {e}")))?;

        let day: Weekday = self
            .day
            .parse()
            .map_err(|e: String| RepositoryError::Query(e))?;

        let created_at = parse_datetime(&self.created_at)?;

        Ok(BookingRecord {
            id,
            from_user: UserId::new(self.from_user),
            to_user: UserId::new(self.to_user),
            day,
            time: self.time,
            created_at,
        })
    }
}

fn parse_datetime(s: &str) -> Result<DateTime<Utc>, RepositoryError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| RepositoryError::Query(format!("invalid datetime: {e}")))
}

impl BookingRepository for SqliteBookingRepository {
    async fn create(&self, booking: &NewBooking) -> Result<BookingRecord, RepositoryError> {
        let record = booking.clone().into_record(BookingId::new());
        let created_at = record.created_at.to_rfc3339();

        let mut tx = self
            .pool
            .writer
            .begin()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO bookings (id, from_user, to_user, day, time, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.from_user.as_str())
        .bind(record.to_user.as_str())
        .bind(record.day.to_string())
        .bind(&record.time)
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        sqlx::query(
            "INSERT INTO received_bookings (id, owner, from_user, to_user, day, time, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(record.id.to_string())
        .bind(record.to_user.as_str())
        .bind(record.from_user.as_str())
        .bind(record.to_user.as_str())
        .bind(record.day.to_string())
        .bind(&record.time)
        .bind(&created_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(record)
    }

    async fn list_inbox(&self, owner: &UserId) -> Result<Vec<BookingRecord>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM received_bookings WHERE owner = ?")
            .bind(owner.as_str())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut records = Vec::with_capacity(rows.len());
        for row in &rows {
            let booking_row =
                BookingRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            records.push(booking_row.into_record()?);
        }

        Ok(records)
    }
}
