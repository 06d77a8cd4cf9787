use crate::types::DbId;
use crate::validation::FieldErrors;

/// Domain-level failure conditions.
///
/// The HTTP layer maps each variant onto a status code; nothing here knows
/// about HTTP.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// No valid credentials accompanied the request. The string is a reason
    /// for logs only, it is never shown to the client.
    #[error("Unauthenticated: {0}")]
    Unauthenticated(String),

    /// The caller is authenticated but may not perform the action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// One or more request fields failed validation.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(FieldErrors),
}
