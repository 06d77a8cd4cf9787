//! Request middleware and extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`errors`] -- Response mapping and panic recovery for error bodies.

pub mod auth;
pub mod errors;
