//! Error-body post-processing.
//!
//! [`AppError`] always renders the production form of a 500. Outside
//! production, [`reveal_error_detail`] swaps in the detail that the error
//! attached as an [`ErrorDetail`] extension.

use std::any::Any;

use axum::extract::State;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::{AppError, ErrorBody, ErrorDetail};
use crate::state::AppState;

/// `map_response_with_state` hook that re-renders 500 bodies with their
/// internal detail when not running in production.
pub async fn reveal_error_detail(State(state): State<AppState>, response: Response) -> Response {
    if state.config.environment.is_production() {
        return response;
    }

    match response.extensions().get::<ErrorDetail>().cloned() {
        Some(ErrorDetail(detail)) => {
            (response.status(), Json(ErrorBody::message(detail))).into_response()
        }
        None => response,
    }
}

/// `CatchPanicLayer` handler: a panicking handler becomes an internal error.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        (*s).to_string()
    } else {
        "unknown panic payload".to_string()
    };

    AppError::InternalError(format!("Handler panicked: {detail}")).into_response()
}
