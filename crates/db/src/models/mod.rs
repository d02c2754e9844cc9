//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs used by the repository layer for writes
//! - Response composition structs (briefs, aggregates) for the read side
//!
//! Wire-facing structs serialize camelCase; row structs map snake_case
//! column names.

pub mod car;
pub mod lap_record;
pub mod review;
pub mod track;
pub mod track_image;
pub mod user;
pub mod zone;
