use serde::{Deserialize, Serialize};

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::user::UserId;

/// The seven fixed weekday literals an availability template is keyed by.
///
/// There is no date arithmetic anywhere in BookMe -- a template is a static
/// weekly grid, so the weekday is just a well-known label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    /// All weekdays in template order.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Weekday {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monday" => Ok(Weekday::Monday),
            "tuesday" => Ok(Weekday::Tuesday),
            "wednesday" => Ok(Weekday::Wednesday),
            "thursday" => Ok(Weekday::Thursday),
            "friday" => Ok(Weekday::Friday),
            "saturday" => Ok(Weekday::Saturday),
            "sunday" => Ok(Weekday::Sunday),
            other => Err(format!("invalid weekday: '{other}'")),
        }
    }
}

/// A single bookable unit: one time label on one weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub day: Weekday,
    /// Opaque time label, e.g. "10:00". Not validated as a clock time.
    pub time: String,
}

impl Slot {
    pub fn new(day: Weekday, time: impl Into<String>) -> Self {
        Self {
            day,
            time: time.into(),
        }
    }
}

/// Nudge a bare two-digit entry toward "HH:MM" by suffixing a colon
/// ("10" becomes "10:"). This is an input convenience, not a format
/// validator -- anything else is returned trimmed but otherwise as-is.
pub fn normalize_time_label(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.len() == 2 && trimmed.chars().all(|c| c.is_ascii_digit()) {
        format!("{trimmed}:")
    } else {
        trimmed.to_string()
    }
}

/// A provider's weekly recurring slot grid: weekday mapped to an ordered
/// sequence of time labels.
///
/// Invariants upheld by every mutation:
/// - a day key exists only while it has at least one slot (an emptied day
///   is removed, never stored as `[]`)
/// - within a day, time labels are unique; insertion order is preserved
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AvailabilityTemplate(BTreeMap<Weekday, Vec<String>>);

impl AvailabilityTemplate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a time label to a day, creating the day on demand.
    /// Returns false (and changes nothing) if the label is already present.
    pub fn add(&mut self, day: Weekday, time: impl Into<String>) -> bool {
        let time = time.into();
        let slots = self.0.entry(day).or_default();
        if slots.contains(&time) {
            return false;
        }
        slots.push(time);
        true
    }

    /// Remove a time label from a day. Deletes the day key entirely when
    /// its last slot is removed. Returns whether anything was removed.
    pub fn remove(&mut self, day: Weekday, time: &str) -> bool {
        let Some(slots) = self.0.get_mut(&day) else {
            return false;
        };
        let before = slots.len();
        slots.retain(|t| t != time);
        let removed = slots.len() != before;
        if slots.is_empty() {
            self.0.remove(&day);
        }
        removed
    }

    pub fn contains(&self, day: Weekday, time: &str) -> bool {
        self.0
            .get(&day)
            .is_some_and(|slots| slots.iter().any(|t| t == time))
    }

    /// Time labels for one day, empty when the day has no slots.
    pub fn slots_for(&self, day: Weekday) -> &[String] {
        self.0.get(&day).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Days that currently carry at least one slot, in weekday order.
    pub fn days(&self) -> impl Iterator<Item = (Weekday, &[String])> {
        self.0.iter().map(|(day, slots)| (*day, slots.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Total number of slots across all days.
    pub fn slot_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

/// How a provider delivers their service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ServiceMode {
    InPerson,
    Online,
    Both,
}

impl fmt::Display for ServiceMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceMode::InPerson => write!(f, "in-person"),
            ServiceMode::Online => write!(f, "online"),
            ServiceMode::Both => write!(f, "both"),
        }
    }
}

impl FromStr for ServiceMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in-person" => Ok(ServiceMode::InPerson),
            "online" => Ok(ServiceMode::Online),
            "both" => Ok(ServiceMode::Both),
            other => Err(format!("invalid service mode: '{other}'")),
        }
    }
}

/// Free-form descriptive fields a provider publishes alongside their
/// availability. All optional and independently settable; rate, duration
/// and the free-text fields are opaque strings, never validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServiceMetadata {
    pub service_name: Option<String>,
    pub location: Option<String>,
    pub rate: Option<String>,
    pub duration: Option<String>,
    pub notes: Option<String>,
    pub mode: Option<ServiceMode>,
    /// User-managed freeform tags, order preserved.
    #[serde(default)]
    pub tags: Vec<String>,
    pub max_bookings_per_day: Option<u32>,
    pub buffer_time: Option<String>,
}

/// A provider's profile document: identity fields from signup plus the
/// published service metadata and weekly availability template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub uid: UserId,
    pub email: String,
    pub display_name: Option<String>,
    #[serde(default)]
    pub metadata: ServiceMetadata,
    #[serde(default)]
    pub availability: AvailabilityTemplate,
}

impl Profile {
    /// Default-empty profile for a user with no saved document yet.
    /// First-time providers have no row until their first save, so readers
    /// fall back to this instead of erroring.
    pub fn empty(uid: UserId) -> Self {
        Self {
            uid,
            email: String::new(),
            display_name: None,
            metadata: ServiceMetadata::default(),
            availability: AvailabilityTemplate::new(),
        }
    }
}

/// Partial profile update: only the populated fields are written, the rest
/// are left untouched by the store (patch semantics, not overwrite).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfilePatch {
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub metadata: Option<ServiceMetadata>,
    pub availability: Option<AvailabilityTemplate>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.display_name.is_none()
            && self.metadata.is_none()
            && self.availability.is_none()
    }
}
