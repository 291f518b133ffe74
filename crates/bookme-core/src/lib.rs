//! Business logic and repository trait definitions for BookMe.
//!
//! This crate defines the "ports" (repository traits) that the
//! infrastructure layer implements, plus the services built on top of
//! them: the availability editor, the booking transaction, and the inbox
//! reader. It depends only on `bookme-types` -- never on `bookme-infra`
//! or any database/IO crate.

pub mod repository;
pub mod service;
pub mod session;
