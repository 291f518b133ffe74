//! REST API request handlers.

pub mod availability;
pub mod booking;
pub mod profile;
