//! Services built on the repository ports.

pub mod availability;
pub mod booking;
pub mod profile;

#[cfg(test)]
pub(crate) mod testing;
