//! In-memory repository fakes for service tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use bookme_types::booking::{BookingId, BookingRecord, NewBooking};
use bookme_types::error::RepositoryError;
use bookme_types::profile::{Profile, ProfilePatch};
use bookme_types::user::UserId;

use crate::repository::booking::BookingRepository;
use crate::repository::profile::ProfileRepository;

/// In-memory `ProfileRepository` with the same patch semantics as the
/// SQLite implementation. Can be toggled to fail saves for failure-path
/// tests.
#[derive(Default)]
pub struct InMemoryProfileRepository {
    profiles: Mutex<HashMap<UserId, Profile>>,
    save_count: AtomicUsize,
    fail_saves: AtomicBool,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, profile: Profile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.uid.clone(), profile);
    }

    pub fn saves(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }

    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }
}

impl ProfileRepository for InMemoryProfileRepository {
    async fn load(&self, uid: &UserId) -> Result<Option<Profile>, RepositoryError> {
        Ok(self.profiles.lock().unwrap().get(uid).cloned())
    }

    async fn save(&self, uid: &UserId, patch: &ProfilePatch) -> Result<(), RepositoryError> {
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(RepositoryError::Query("simulated save failure".to_string()));
        }
        self.save_count.fetch_add(1, Ordering::SeqCst);

        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .entry(uid.clone())
            .or_insert_with(|| Profile::empty(uid.clone()));
        if let Some(email) = &patch.email {
            profile.email = email.clone();
        }
        if let Some(name) = &patch.display_name {
            profile.display_name = Some(name.clone());
        }
        if let Some(metadata) = &patch.metadata {
            profile.metadata = metadata.clone();
        }
        if let Some(availability) = &patch.availability {
            profile.availability = availability.clone();
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<Profile>, RepositoryError> {
        let mut all: Vec<Profile> = self.profiles.lock().unwrap().values().cloned().collect();
        all.sort_by(|a, b| a.uid.cmp(&b.uid));
        Ok(all)
    }
}

/// In-memory `BookingRepository` writing the log and inbox copies
/// together, mirroring the fan-out of the SQLite implementation.
/// `fail_after(n)` makes every create past the first `n` fail, for
/// partial-failure tests.
#[derive(Default)]
pub struct InMemoryBookingRepository {
    log: Mutex<Vec<BookingRecord>>,
    inbox: Mutex<HashMap<UserId, Vec<BookingRecord>>>,
    fail_after: Mutex<Option<usize>>,
}

impl InMemoryBookingRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_after(&self, n: usize) {
        *self.fail_after.lock().unwrap() = Some(n);
    }

    pub fn log_records(&self) -> Vec<BookingRecord> {
        self.log.lock().unwrap().clone()
    }

    pub fn inbox_records(&self, owner: &UserId) -> Vec<BookingRecord> {
        self.inbox
            .lock()
            .unwrap()
            .get(owner)
            .cloned()
            .unwrap_or_default()
    }
}

impl BookingRepository for InMemoryBookingRepository {
    async fn create(&self, booking: &NewBooking) -> Result<BookingRecord, RepositoryError> {
        if let Some(limit) = *self.fail_after.lock().unwrap() {
            if self.log.lock().unwrap().len() >= limit {
                return Err(RepositoryError::Query(
                    "simulated write failure".to_string(),
                ));
            }
        }

        let record = booking.clone().into_record(BookingId::new());
        self.log.lock().unwrap().push(record.clone());
        self.inbox
            .lock()
            .unwrap()
            .entry(record.to_user.clone())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn list_inbox(&self, owner: &UserId) -> Result<Vec<BookingRecord>, RepositoryError> {
        Ok(self.inbox_records(owner))
    }
}
