//! Handlers for the `/posts` resource.
//!
//! Update and delete are owner-only. Both look the post up first so a
//! missing post is a 404 before ownership is considered, and ownership is
//! checked before the body is validated.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inkpost_core::error::CoreError;
use inkpost_core::pagination::Page;
use inkpost_core::policy::authorize_modify;
use inkpost_core::post::{PostFields, PostFilter, PostInput};
use inkpost_core::types::DbId;
use inkpost_db::models::post::{CreatePost, Post, UpdatePost};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::query::PostListParams;
use crate::state::AppState;

/// GET /api/posts
///
/// Filters (`search`, `category_id`, `user_id`) are AND-composed. An id
/// filter that is not a valid id matches nothing.
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    QueryParams(params): QueryParams<PostListParams>,
) -> AppResult<Json<Page<Post>>> {
    let page = params.page_request();
    let filter = PostFilter::from_query(
        params.search.as_deref(),
        params.category_id.as_deref(),
        params.user_id.as_deref(),
    );

    let posts = match filter {
        Some(filter) => state.store.list_posts(&filter, page).await?,
        None => Page::empty(page),
    };
    Ok(Json(posts))
}

/// POST /api/posts
///
/// The owner is always the caller; a `user_id` in the body is ignored.
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<Post>)> {
    let fields = validate(&state, &body).await?;
    let post = state
        .store
        .create_post(&CreatePost::new(user.user_id, fields))
        .await?;

    tracing::info!(user_id = user.user_id, post_id = post.id, "Post created");
    Ok((StatusCode::CREATED, Json(post)))
}

/// GET /api/posts/{id}
pub async fn show(
    State(state): State<AppState>,
    _user: AuthUser,
    PathId(id): PathId,
) -> AppResult<Json<Post>> {
    let post = find(&state, id).await?;
    Ok(Json(post))
}

/// PUT|PATCH /api/posts/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Post>> {
    let post = find(&state, id).await?;
    authorize_modify(user.user_id, &post)?;

    let fields = validate(&state, &body).await?;
    let post = state
        .store
        .update_post(id, &UpdatePost::from(fields))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = user.user_id, post_id = id, "Post updated");
    Ok(Json(post))
}

/// DELETE /api/posts/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    let post = find(&state, id).await?;
    authorize_modify(user.user_id, &post)?;

    state.store.delete_post(id).await?;

    tracing::info!(user_id = user.user_id, post_id = id, "Post deleted");
    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Post", id })
}

async fn find(state: &AppState, id: DbId) -> AppResult<Post> {
    state.store.find_post(id).await?.ok_or_else(|| not_found(id))
}

/// Shape checks, then the category existence check, reported together.
async fn validate(state: &AppState, body: &Value) -> AppResult<PostFields> {
    let mut input = PostInput::parse(body);
    if let Some(category_id) = input.category_to_verify() {
        if !state.store.category_exists(category_id).await? {
            input.reject_category();
        }
    }
    Ok(input.finish()?)
}
