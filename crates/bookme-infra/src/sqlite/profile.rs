//! SQLite profile repository implementation.
//!
//! Implements `ProfileRepository` from `bookme-core`. The availability
//! template and service metadata live in JSON columns; `save` is an upsert
//! whose ON CONFLICT clause COALESCEs each column against the existing
//! row, which gives the patch semantics the core relies on -- a
//! metadata-only save and a template-only save never stomp each other.

use bookme_core::repository::profile::ProfileRepository;
use bookme_types::error::RepositoryError;
use bookme_types::profile::{AvailabilityTemplate, Profile, ProfilePatch, ServiceMetadata};
use bookme_types::user::UserId;
use sqlx::Row;

use super::pool::DatabasePool;

/// SQLite-backed implementation of `ProfileRepository`.
#[derive(Clone)]
pub struct SqliteProfileRepository {
    pool: DatabasePool,
}

impl SqliteProfileRepository {
    /// Create a new repository backed by the given database pool.
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

/// Internal row type for mapping SQLite rows to the domain Profile.
struct ProfileRow {
    uid: String,
    email: Option<String>,
    display_name: Option<String>,
    metadata: Option<String>,
    availability: Option<String>,
}

impl ProfileRow {
    fn from_row(row: &sqlx::sqlite::SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            uid: row.try_get("uid")?,
            email: row.try_get("email")?,
            display_name: row.try_get("display_name")?,
            metadata: row.try_get("metadata")?,
            availability: row.try_get("availability")?,
        })
    }

    fn into_profile(self) -> Result<Profile, RepositoryError> {
        let metadata: ServiceMetadata = match self.metadata.as_deref() {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| RepositoryError::Query(format!("invalid metadata JSON: {e}")))?,
            None => ServiceMetadata::default(),
        };

        let availability: AvailabilityTemplate = match self.availability.as_deref() {
            Some(json) => serde_json::from_str(json)
                .map_err(|e| RepositoryError::Query(format!("invalid availability JSON: {e}")))?,
            None => AvailabilityTemplate::new(),
        };

        Ok(Profile {
            uid: UserId::new(self.uid),
            email: self.email.unwrap_or_default(),
            display_name: self.display_name.filter(|n| !n.is_empty()),
            metadata,
            availability,
        })
    }
}

impl ProfileRepository for SqliteProfileRepository {
    async fn load(&self, uid: &UserId) -> Result<Option<Profile>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM users WHERE uid = ?")
            .bind(uid.as_str())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        match row {
            Some(row) => {
                let profile_row =
                    ProfileRow::from_row(&row).map_err(|e| RepositoryError::Query(e.to_string()))?;
                Ok(Some(profile_row.into_profile()?))
            }
            None => Ok(None),
        }
    }

    async fn save(&self, uid: &UserId, patch: &ProfilePatch) -> Result<(), RepositoryError> {
        let metadata_json = patch
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))?;
        let availability_json = patch
            .availability
            .as_ref()
            .map(serde_json::to_string)
            .transpose()
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let now = chrono::Utc::now().to_rfc3339();

        // NULL bindings fall through the COALESCE so only the populated
        // patch fields replace the stored columns.
        sqlx::query(
            "INSERT INTO users (uid, email, display_name, metadata, availability, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             ON CONFLICT(uid) DO UPDATE SET
                 email = COALESCE(excluded.email, users.email),
                 display_name = COALESCE(excluded.display_name, users.display_name),
                 metadata = COALESCE(excluded.metadata, users.metadata),
                 availability = COALESCE(excluded.availability, users.availability),
                 updated_at = excluded.updated_at",
        )
        .bind(uid.as_str())
        .bind(&patch.email)
        .bind(&patch.display_name)
        .bind(&metadata_json)
        .bind(&availability_json)
        .bind(&now)
        .bind(&now)
        .execute(&self.pool.writer)
        .await
        .map_err(|e| RepositoryError::Query(e.to_string()))?;

        Ok(())
    }

    async fn list(&self) -> Result<Vec<Profile>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM users")
            .fetch_all(&self.pool.reader)
            .await
            .map_err(|e| RepositoryError::Query(e.to_string()))?;

        let mut profiles = Vec::with_capacity(rows.len());
        for row in &rows {
            let profile_row =
                ProfileRow::from_row(row).map_err(|e| RepositoryError::Query(e.to_string()))?;
            profiles.push(profile_row.into_profile()?);
        }

        Ok(profiles)
    }
}
