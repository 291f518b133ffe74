//! Infrastructure layer for BookMe.
//!
//! Contains implementations of the repository traits defined in
//! `bookme-core`: SQLite storage with WAL mode and split read/write pools,
//! plus the configuration loader.

pub mod config;
pub mod sqlite;
