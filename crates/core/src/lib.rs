//! Inkpost domain logic.
//!
//! Everything in this crate is pure: request-field validation, the post
//! ownership policy, pagination arithmetic and list filters. Persistence
//! lives in `inkpost-db`, HTTP in `inkpost-api`.

pub mod account;
pub mod category;
pub mod error;
pub mod pagination;
pub mod policy;
pub mod post;
pub mod types;
pub mod validation;
