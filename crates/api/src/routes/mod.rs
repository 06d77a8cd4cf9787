pub mod auth;
pub mod categories;
pub mod health;
pub mod posts;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /register                 register (public)
/// /login                    login (public)
/// /logout                   logout
/// /user                     current user
///
/// /posts                    list, create
/// /posts/{id}               get, update, delete
///
/// /categories               list, create
/// /categories/{id}          get, update, delete
/// ```
///
/// Everything except `/register` and `/login` requires a bearer token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .nest("/posts", posts::router())
        .nest("/categories", categories::router())
}
