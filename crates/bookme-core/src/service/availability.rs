//! Availability editor: stage-then-commit slot edits on a provider's
//! weekly template.
//!
//! The editor works on a local copy of the persisted template. Additions
//! are staged and flushed in one merge-write by `commit`; removals write
//! through immediately. Every edit session moves through an explicit state
//! machine instead of leaving unconfirmed local mutations behind: a failed
//! write re-fetches the persisted template so the working copy never
//! silently diverges from the store.

use bookme_types::error::ProfileError;
use bookme_types::profile::{AvailabilityTemplate, ProfilePatch, Slot, Weekday, normalize_time_label};
use bookme_types::user::UserId;

use crate::repository::profile::ProfileRepository;

/// Where an edit session stands relative to the store.
///
/// - `Clean`: working template matches the last fetch, nothing staged
/// - `Pending`: staged slots not yet persisted
/// - `Committed`: last write confirmed by the store
/// - `Failed`: last write failed; the template has been re-fetched and
///   staged slots (if any) are preserved for a retry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    Clean,
    Pending,
    Committed,
    Failed,
}

/// One provider's availability edit session.
pub struct AvailabilityEditor {
    owner: UserId,
    template: AvailabilityTemplate,
    staged: Vec<Slot>,
    state: EditState,
}

impl AvailabilityEditor {
    /// Open an edit session on the owner's persisted template. A missing
    /// profile document yields an empty template, not an error.
    pub async fn load<R: ProfileRepository>(
        repo: &R,
        owner: UserId,
    ) -> Result<Self, ProfileError> {
        let template = repo
            .load(&owner)
            .await
            .map_err(|e| ProfileError::StorageError(e.to_string()))?
            .map(|p| p.availability)
            .unwrap_or_default();

        Ok(Self {
            owner,
            template,
            staged: Vec::new(),
            state: EditState::Clean,
        })
    }

    /// Stage one slot for the next commit. The time label is normalized
    /// (a bare two-digit entry gains a trailing colon); a blank label is
    /// silently ignored and returns false. Duplicates are tolerated here
    /// and collapsed at commit time.
    pub fn stage_slot(&mut self, day: Weekday, time: &str) -> bool {
        let time = normalize_time_label(time);
        if time.is_empty() {
            return false;
        }
        self.staged.push(Slot::new(day, time));
        self.state = EditState::Pending;
        true
    }

    pub fn staged(&self) -> &[Slot] {
        &self.staged
    }

    pub fn template(&self) -> &AvailabilityTemplate {
        &self.template
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    /// Merge every staged slot into the template and persist the result in
    /// one patch save. Per day, each time label lands at most once
    /// regardless of how often it was staged.
    ///
    /// With nothing staged this is a no-op that issues no store call. On a
    /// store failure the staged list is kept for retry and the working
    /// template is re-fetched.
    pub async fn commit<R: ProfileRepository>(&mut self, repo: &R) -> Result<(), ProfileError> {
        if self.staged.is_empty() {
            return Ok(());
        }

        let mut merged = self.template.clone();
        for slot in &self.staged {
            merged.add(slot.day, slot.time.clone());
        }

        let patch = ProfilePatch {
            availability: Some(merged.clone()),
            ..Default::default()
        };

        match repo.save(&self.owner, &patch).await {
            Ok(()) => {
                self.template = merged;
                self.staged.clear();
                self.state = EditState::Committed;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, error = %e, "availability commit failed");
                self.state = EditState::Failed;
                self.refresh(repo).await;
                Err(ProfileError::StorageError(e.to_string()))
            }
        }
    }

    /// Remove one time label from the persisted template and write the
    /// result through immediately (no staging). An emptied day key is
    /// dropped entirely. Returns false without a store call when the slot
    /// is not present.
    pub async fn remove_slot<R: ProfileRepository>(
        &mut self,
        repo: &R,
        day: Weekday,
        time: &str,
    ) -> Result<bool, ProfileError> {
        if !self.template.remove(day, time) {
            return Ok(false);
        }

        let patch = ProfilePatch {
            availability: Some(self.template.clone()),
            ..Default::default()
        };

        match repo.save(&self.owner, &patch).await {
            Ok(()) => {
                self.state = EditState::Committed;
                Ok(true)
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, error = %e, "slot removal failed");
                self.state = EditState::Failed;
                self.refresh(repo).await;
                Err(ProfileError::StorageError(e.to_string()))
            }
        }
    }

    /// Best-effort re-fetch after a failed write. On success the working
    /// template is back in sync with the store: `Clean` if nothing is
    /// staged, `Pending` if staged slots await a retry. If the re-fetch
    /// itself fails the session stays `Failed`.
    async fn refresh<R: ProfileRepository>(&mut self, repo: &R) {
        match repo.load(&self.owner).await {
            Ok(profile) => {
                self.template = profile.map(|p| p.availability).unwrap_or_default();
                self.state = if self.staged.is_empty() {
                    EditState::Clean
                } else {
                    EditState::Pending
                };
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, error = %e, "template re-fetch failed");
            }
        }
    }
}
