use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use inkpost_core::error::CoreError;
use inkpost_core::validation::FieldErrors;
use serde::Serialize;

use crate::config::Environment;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Status codes and bodies come from [`render`].
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `inkpost_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body could not be read as JSON.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// No route matches the path, or a path parameter is malformed.
    #[error("Route not found")]
    RouteNotFound,

    #[error("Method not allowed")]
    MethodNotAllowed,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// JSON body of every error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
}

impl ErrorBody {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            errors: None,
        }
    }
}

/// Internal detail of a 500 response, carried as a response extension so a
/// later layer can reveal it outside production.
#[derive(Debug, Clone)]
pub struct ErrorDetail(pub String);

const SERVER_ERROR: &str = "Server Error.";

/// Map an error onto its status code and client-facing body.
///
/// Server errors only carry their detail when `environment` is not
/// production.
pub fn render(err: &AppError, environment: Environment) -> (StatusCode, ErrorBody) {
    let server_error = || {
        let message = if environment.is_production() {
            SERVER_ERROR.to_string()
        } else {
            err.to_string()
        };
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::message(message))
    };

    match err {
        // --- CoreError variants ---
        AppError::Core(core) => match core {
            CoreError::Unauthenticated(_) => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::message("Unauthenticated."),
            ),
            CoreError::Forbidden(_) => (
                StatusCode::FORBIDDEN,
                ErrorBody::message("This action is unauthorized."),
            ),
            CoreError::NotFound { entity, .. } => (
                StatusCode::NOT_FOUND,
                ErrorBody::message(format!("{entity} not found")),
            ),
            CoreError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorBody {
                    message: "The given data was invalid.".to_string(),
                    errors: Some(errors.clone()),
                },
            ),
        },

        // --- Database errors ---
        AppError::Database(db_err) => {
            classify_sqlx_error(db_err).unwrap_or_else(server_error)
        }

        // --- HTTP-specific errors ---
        AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, ErrorBody::message(msg.clone())),
        AppError::RouteNotFound => (StatusCode::NOT_FOUND, ErrorBody::message("Not Found.")),
        AppError::MethodNotAllowed => (
            StatusCode::METHOD_NOT_ALLOWED,
            ErrorBody::message("Method Not Allowed."),
        ),
        AppError::InternalError(_) => server_error(),
    }
}

impl IntoResponse for AppError {
    /// Always renders the production form; the detail of a 500 rides along
    /// as an [`ErrorDetail`] extension.
    fn into_response(self) -> Response {
        let (status, body) = render(&self, Environment::Production);

        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        }

        let mut response = (status, Json(body)).into_response();
        if status.is_server_error() {
            response
                .extensions_mut()
                .insert(ErrorDetail(self.to_string()));
        }
        response
    }
}

/// Classify a sqlx error that has a client-facing meaning.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else returns `None` and is treated as a server error.
fn classify_sqlx_error(err: &sqlx::Error) -> Option<(StatusCode, ErrorBody)> {
    match err {
        sqlx::Error::RowNotFound => {
            Some((StatusCode::NOT_FOUND, ErrorBody::message("Not Found.")))
        }
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
            if db_err.code().as_deref() != Some("23505") {
                return None;
            }
            let constraint = db_err.constraint().unwrap_or("unknown");
            constraint.starts_with("uq_").then(|| {
                (
                    StatusCode::CONFLICT,
                    ErrorBody::message(format!(
                        "Duplicate value violates unique constraint: {constraint}"
                    )),
                )
            })
        }
        _ => None,
    }
}
