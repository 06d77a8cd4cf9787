//! Object-safe store traits.
//!
//! Handlers depend on `Arc<dyn BlogStore>` rather than on `PgPool`, so the
//! HTTP layer can be exercised against any implementation. [`PgStore`] is
//! the production one and simply delegates to the repositories.

use std::sync::Arc;

use async_trait::async_trait;
use inkpost_core::pagination::{Page, PageRequest};
use inkpost_core::post::PostFilter;
use inkpost_core::types::DbId;

use crate::models::access_token::{AccessToken, CreateAccessToken};
use crate::models::category::{Category, CreateCategory, UpdateCategory};
use crate::models::post::{CreatePost, Post, UpdatePost};
use crate::models::user::{CreateUser, User};
use crate::repositories::{AccessTokenRepo, CategoryRepo, PostRepo, UserRepo};
use crate::DbPool;

/// Shared handle to whichever store backs the application.
pub type DynStore = Arc<dyn BlogStore>;

#[async_trait]
pub trait PostStore: Send + Sync {
    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, sqlx::Error>;

    async fn find_post(&self, id: DbId) -> Result<Option<Post>, sqlx::Error>;

    async fn create_post(&self, input: &CreatePost) -> Result<Post, sqlx::Error>;

    /// `None` when the post no longer exists.
    async fn update_post(&self, id: DbId, input: &UpdatePost)
        -> Result<Option<Post>, sqlx::Error>;

    async fn delete_post(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>, sqlx::Error>;

    async fn find_category(&self, id: DbId) -> Result<Option<Category>, sqlx::Error>;

    async fn category_exists(&self, id: DbId) -> Result<bool, sqlx::Error>;

    /// Whether a category other than `except` already uses `name`.
    async fn category_name_taken(
        &self,
        name: &str,
        except: Option<DbId>,
    ) -> Result<bool, sqlx::Error>;

    async fn create_category(&self, input: &CreateCategory) -> Result<Category, sqlx::Error>;

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error>;

    async fn delete_category(&self, id: DbId) -> Result<bool, sqlx::Error>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, input: &CreateUser) -> Result<User, sqlx::Error>;

    async fn find_user(&self, id: DbId) -> Result<Option<User>, sqlx::Error>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error>;
}

#[async_trait]
pub trait AccessTokenStore: Send + Sync {
    async fn create_access_token(
        &self,
        input: &CreateAccessToken,
    ) -> Result<AccessToken, sqlx::Error>;

    async fn access_token_active(&self, jti: &str) -> Result<bool, sqlx::Error>;

    async fn revoke_access_token(&self, jti: &str) -> Result<bool, sqlx::Error>;
}

/// Everything the API needs from persistence.
#[async_trait]
pub trait BlogStore: PostStore + CategoryStore + UserStore + AccessTokenStore {
    /// Cheap connectivity probe for the health route.
    async fn ping(&self) -> Result<(), sqlx::Error>;
}

/// Postgres-backed store.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, sqlx::Error> {
        PostRepo::list(&self.pool, filter, page).await
    }

    async fn find_post(&self, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        PostRepo::find_by_id(&self.pool, id).await
    }

    async fn create_post(&self, input: &CreatePost) -> Result<Post, sqlx::Error> {
        PostRepo::create(&self.pool, input).await
    }

    async fn update_post(
        &self,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        PostRepo::update(&self.pool, id, input).await
    }

    async fn delete_post(&self, id: DbId) -> Result<bool, sqlx::Error> {
        PostRepo::delete(&self.pool, id).await
    }
}

#[async_trait]
impl CategoryStore for PgStore {
    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>, sqlx::Error> {
        CategoryRepo::list(&self.pool, page).await
    }

    async fn find_category(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        CategoryRepo::find_by_id(&self.pool, id).await
    }

    async fn category_exists(&self, id: DbId) -> Result<bool, sqlx::Error> {
        CategoryRepo::exists(&self.pool, id).await
    }

    async fn category_name_taken(
        &self,
        name: &str,
        except: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let existing = CategoryRepo::find_by_name(&self.pool, name).await?;
        Ok(existing.is_some_and(|c| Some(c.id) != except))
    }

    async fn create_category(&self, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        CategoryRepo::create(&self.pool, input).await
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        CategoryRepo::update(&self.pool, id, input).await
    }

    async fn delete_category(&self, id: DbId) -> Result<bool, sqlx::Error> {
        CategoryRepo::delete(&self.pool, id).await
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        UserRepo::create(&self.pool, input).await
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_id(&self.pool, id).await
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        UserRepo::find_by_email(&self.pool, email).await
    }
}

#[async_trait]
impl AccessTokenStore for PgStore {
    async fn create_access_token(
        &self,
        input: &CreateAccessToken,
    ) -> Result<AccessToken, sqlx::Error> {
        AccessTokenRepo::create(&self.pool, input).await
    }

    async fn access_token_active(&self, jti: &str) -> Result<bool, sqlx::Error> {
        AccessTokenRepo::is_active(&self.pool, jti).await
    }

    async fn revoke_access_token(&self, jti: &str) -> Result<bool, sqlx::Error> {
        AccessTokenRepo::revoke(&self.pool, jti).await
    }
}

#[async_trait]
impl BlogStore for PgStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        crate::health_check(&self.pool).await
    }
}
