//! Row structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` struct matching the database row
//! - An insert DTO built from the corresponding core type
//! - A `TryFrom` conversion from the row back into the core type

pub mod comment;
pub mod progress;
