//! Shared domain types for the Trackside platform.
//!
//! Holds the id/timestamp aliases, the closed domain enums, and the
//! [`error::CoreError`] taxonomy that the db and api crates build on.

pub mod enums;
pub mod error;
pub mod types;
