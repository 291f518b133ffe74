//! Profile repository trait definition.

use bookme_types::error::RepositoryError;
use bookme_types::profile::{Profile, ProfilePatch};
use bookme_types::user::UserId;

/// Repository trait for profile persistence.
///
/// Implementations live in bookme-infra (e.g., SqliteProfileRepository).
/// Uses native async fn in traits (Rust 2024 edition, no async_trait macro).
pub trait ProfileRepository: Send + Sync {
    /// Fetch a profile document by uid. `None` means the user has never
    /// saved anything; callers treat that as a default-empty profile, not
    /// an error.
    fn load(
        &self,
        uid: &UserId,
    ) -> impl std::future::Future<Output = Result<Option<Profile>, RepositoryError>> + Send;

    /// Merge-write the populated fields of `patch` into the profile
    /// document, creating it if absent. Unset fields are left untouched so
    /// concurrent disjoint-field saves never stomp each other; same-field
    /// writes are last-write-wins with no version check.
    fn save(
        &self,
        uid: &UserId,
        patch: &ProfilePatch,
    ) -> impl std::future::Future<Output = Result<(), RepositoryError>> + Send;

    /// Full-collection scan of all profiles, store-native order.
    fn list(
        &self,
    ) -> impl std::future::Future<Output = Result<Vec<Profile>, RepositoryError>> + Send;
}
