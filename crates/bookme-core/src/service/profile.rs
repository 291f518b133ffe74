//! Profile service: signup registration, profile reads with default-empty
//! fallback, and metadata/availability updates.

use bookme_types::error::ProfileError;
use bookme_types::profile::{
    AvailabilityTemplate, Profile, ProfilePatch, ServiceMetadata, Slot, Weekday,
};
use bookme_types::user::UserId;

use crate::repository::profile::ProfileRepository;
use crate::service::availability::AvailabilityEditor;
use crate::session::SessionContext;

/// Service over one provider's profile document and its availability
/// template. Generic over the repository trait so tests run against an
/// in-memory store.
pub struct ProfileService<R: ProfileRepository> {
    repo: R,
}

impl<R: ProfileRepository> ProfileService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Signup hook: create the empty profile document for a freshly
    /// authenticated user. Idempotent -- an existing profile is returned
    /// untouched rather than reset.
    pub async fn register(
        &self,
        ctx: &SessionContext,
        email: &str,
    ) -> Result<Profile, ProfileError> {
        if let Some(existing) = self
            .repo
            .load(&ctx.user_id)
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))?
        {
            return Ok(existing);
        }

        let patch = ProfilePatch {
            email: Some(email.to_string()),
            availability: Some(AvailabilityTemplate::new()),
            ..Default::default()
        };
        self.repo
            .save(&ctx.user_id, &patch)
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))?;

        tracing::info!(uid = %ctx.user_id, "profile registered");

        let mut profile = Profile::empty(ctx.user_id.clone());
        profile.email = email.to_string();
        Ok(profile)
    }

    /// Fetch a profile, falling back to a default-empty one when the user
    /// has never saved a document.
    pub async fn get(&self, uid: &UserId) -> Result<Profile, ProfileError> {
        Ok(self
            .repo
            .load(uid)
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))?
            .unwrap_or_else(|| Profile::empty(uid.clone())))
    }

    /// All provider profiles (the browse screen's source).
    pub async fn list(&self) -> Result<Vec<Profile>, ProfileError> {
        self.repo
            .list()
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))
    }

    /// Patch the caller's display name and/or service metadata. With
    /// neither supplied this is a no-op that issues no store call.
    pub async fn update_profile(
        &self,
        ctx: &SessionContext,
        display_name: Option<String>,
        metadata: Option<ServiceMetadata>,
    ) -> Result<Profile, ProfileError> {
        let patch = ProfilePatch {
            display_name,
            metadata,
            ..Default::default()
        };
        if !patch.is_empty() {
            self.repo
                .save(&ctx.user_id, &patch)
                .await
                .map_err(|e| ProfileError::StorageError(e.to_string()))?;
        }
        self.get(&ctx.user_id).await
    }

    /// Stage the given slots on the caller's template and commit them in
    /// one merge-write. Returns the template as persisted.
    pub async fn add_slots(
        &self,
        ctx: &SessionContext,
        slots: Vec<Slot>,
    ) -> Result<AvailabilityTemplate, ProfileError> {
        let mut editor = AvailabilityEditor::load(&self.repo, ctx.user_id.clone()).await?;
        for slot in &slots {
            editor.stage_slot(slot.day, &slot.time);
        }
        editor.commit(&self.repo).await?;
        Ok(editor.template().clone())
    }

    /// Remove one slot from the caller's persisted template.
    pub async fn remove_slot(
        &self,
        ctx: &SessionContext,
        day: Weekday,
        time: &str,
    ) -> Result<AvailabilityTemplate, ProfileError> {
        let mut editor = AvailabilityEditor::load(&self.repo, ctx.user_id.clone()).await?;
        editor.remove_slot(&self.repo, day, time).await?;
        Ok(editor.template().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::testing::InMemoryProfileRepository;

    fn ctx() -> SessionContext {
        SessionContext::new(UserId::new("provider-1"))
    }

    #[tokio::test]
    async fn test_get_unknown_user_returns_default_empty() {
        let service = ProfileService::new(InMemoryProfileRepository::new());
        let profile = service.get(&UserId::new("nobody")).await.unwrap();
        assert!(profile.availability.is_empty());
        assert!(profile.email.is_empty());
        assert!(profile.display_name.is_none());
    }

    #[tokio::test]
    async fn test_register_is_idempotent() {
        let service = ProfileService::new(InMemoryProfileRepository::new());
        let ctx = ctx();

        service.register(&ctx, "ada@example.com").await.unwrap();
        service
            .update_profile(&ctx, Some("Ada".to_string()), None)
            .await
            .unwrap();

        // A second register must not reset the saved display name
        let again = service.register(&ctx, "ada@example.com").await.unwrap();
        assert_eq!(again.display_name.as_deref(), Some("Ada"));
    }

    #[tokio::test]
    async fn test_update_profile_with_nothing_to_patch_is_noop() {
        let repo = InMemoryProfileRepository::new();
        let service = ProfileService::new(repo);
        let profile = service.update_profile(&ctx(), None, None).await.unwrap();
        assert!(profile.display_name.is_none());
    }

    #[tokio::test]
    async fn test_metadata_patch_leaves_availability_untouched() {
        let service = ProfileService::new(InMemoryProfileRepository::new());
        let ctx = ctx();

        service
            .add_slots(&ctx, vec![Slot::new(Weekday::Monday, "10:00")])
            .await
            .unwrap();

        let metadata = ServiceMetadata {
            service_name: Some("Haircut".to_string()),
            rate: Some("$30".to_string()),
            ..Default::default()
        };
        let profile = service
            .update_profile(&ctx, None, Some(metadata))
            .await
            .unwrap();

        assert_eq!(profile.metadata.service_name.as_deref(), Some("Haircut"));
        assert_eq!(profile.availability.slots_for(Weekday::Monday), ["10:00"]);
    }

    #[tokio::test]
    async fn test_add_slots_merges_into_existing_template() {
        let service = ProfileService::new(InMemoryProfileRepository::new());
        let ctx = ctx();

        service
            .add_slots(&ctx, vec![Slot::new(Weekday::Monday, "10:00")])
            .await
            .unwrap();
        let template = service
            .add_slots(
                &ctx,
                vec![
                    Slot::new(Weekday::Monday, "11:00"),
                    Slot::new(Weekday::Friday, "09:00"),
                ],
            )
            .await
            .unwrap();

        assert_eq!(template.slots_for(Weekday::Monday), ["10:00", "11:00"]);
        assert_eq!(template.slots_for(Weekday::Friday), ["09:00"]);
    }

    #[tokio::test]
    async fn test_remove_slot_persists_pruned_template() {
        let service = ProfileService::new(InMemoryProfileRepository::new());
        let ctx = ctx();

        service
            .add_slots(&ctx, vec![Slot::new(Weekday::Monday, "10:00")])
            .await
            .unwrap();
        let template = service
            .remove_slot(&ctx, Weekday::Monday, "10:00")
            .await
            .unwrap();

        assert!(template.is_empty());
        let persisted = service.get(&ctx.user_id).await.unwrap();
        assert!(persisted.availability.is_empty());
    }
}
