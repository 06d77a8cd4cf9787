//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - Create/update DTOs built from validated core input

pub mod access_token;
pub mod category;
pub mod post;
pub mod user;
