//! Handlers for the `/categories` resource. Any authenticated user may
//! manage categories.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use inkpost_core::category::{CategoryFields, CategoryInput};
use inkpost_core::error::CoreError;
use inkpost_core::pagination::Page;
use inkpost_core::types::DbId;
use inkpost_db::models::category::{Category, CreateCategory, UpdateCategory};
use serde_json::Value;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId, QueryParams};
use crate::middleware::auth::AuthUser;
use crate::query::PageParams;
use crate::state::AppState;

/// GET /api/categories
pub async fn list(
    State(state): State<AppState>,
    _user: AuthUser,
    QueryParams(params): QueryParams<PageParams>,
) -> AppResult<Json<Page<Category>>> {
    let categories = state.store.list_categories(params.page_request()).await?;
    Ok(Json(categories))
}

/// POST /api/categories
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(body): JsonBody,
) -> AppResult<(StatusCode, Json<Category>)> {
    let fields = validate(&state, &body, None).await?;
    let category = state
        .store
        .create_category(&CreateCategory::from(fields))
        .await?;

    tracing::info!(user_id = user.user_id, category_id = category.id, "Category created");
    Ok((StatusCode::CREATED, Json(category)))
}

/// GET /api/categories/{id}
pub async fn show(
    State(state): State<AppState>,
    _user: AuthUser,
    PathId(id): PathId,
) -> AppResult<Json<Category>> {
    let category = state
        .store
        .find_category(id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(category))
}

/// PUT|PATCH /api/categories/{id}
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
    JsonBody(body): JsonBody,
) -> AppResult<Json<Category>> {
    if state.store.find_category(id).await?.is_none() {
        return Err(not_found(id));
    }

    let fields = validate(&state, &body, Some(id)).await?;
    let category = state
        .store
        .update_category(id, &UpdateCategory::from(fields))
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(user_id = user.user_id, category_id = id, "Category updated");
    Ok(Json(category))
}

/// DELETE /api/categories/{id}
///
/// Posts in the category are kept and become uncategorised.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<StatusCode> {
    if !state.store.delete_category(id).await? {
        return Err(not_found(id));
    }

    tracing::info!(user_id = user.user_id, category_id = id, "Category deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Category",
        id,
    })
}

/// `except` is the category being updated, which may keep its own name.
async fn validate(
    state: &AppState,
    body: &Value,
    except: Option<DbId>,
) -> AppResult<CategoryFields> {
    let mut input = CategoryInput::parse(body);
    if let Some(name) = input.name_to_verify() {
        if state.store.category_name_taken(name, except).await? {
            input.reject_taken_name();
        }
    }
    Ok(input.finish()?)
}
