//! Route definitions for account endpoints.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Account routes, mounted directly under `/api`.
///
/// ```text
/// POST /register -> register (public)
/// POST /login    -> login (public)
/// POST /logout   -> logout (requires auth)
/// GET  /user     -> me (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/user", get(auth::me))
}
