//! Shared domain types for BookMe.
//!
//! This crate contains the core domain types used across the BookMe
//! scheduler: Profile, AvailabilityTemplate, BookingRecord, and their
//! associated error types.
//!
//! Zero infrastructure dependencies -- only serde, uuid, chrono, thiserror.

pub mod booking;
pub mod config;
pub mod error;
pub mod profile;
pub mod user;
