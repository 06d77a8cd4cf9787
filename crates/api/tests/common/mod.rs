//! Shared integration-test harness.
//!
//! Tests drive the real router (same middleware stack as production) backed
//! by [`MemoryStore`], an in-memory implementation of the store traits, so
//! no database is required.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Mutex;
use tower::ServiceExt;

use inkpost_api::auth::jwt::{generate_access_token, JwtConfig};
use inkpost_api::config::{Environment, LogFormat, ServerConfig};
use inkpost_api::router::build_app_router;
use inkpost_api::state::AppState;
use inkpost_core::pagination::{Page, PageRequest};
use inkpost_core::post::PostFilter;
use inkpost_core::types::{DbId, Timestamp};
use inkpost_db::models::access_token::{AccessToken, CreateAccessToken};
use inkpost_db::models::category::{Category, CreateCategory, UpdateCategory};
use inkpost_db::models::post::{CreatePost, Post, PostRow, UpdatePost};
use inkpost_db::models::user::{CreateUser, User};
use inkpost_db::store::{AccessTokenStore, BlogStore, CategoryStore, PostStore, UserStore};

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct PostRecord {
    id: DbId,
    user_id: DbId,
    category_id: Option<DbId>,
    title: String,
    content: String,
    created_at: Timestamp,
    updated_at: Timestamp,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    posts: Vec<PostRecord>,
    tokens: Vec<AccessToken>,
    user_seq: DbId,
    category_seq: DbId,
    post_seq: DbId,
    token_seq: DbId,
}

impl PostRecord {
    /// The list filters, evaluated the way the SQL `WHERE` clause does.
    fn matches(&self, filter: &PostFilter) -> bool {
        let title_ok = filter.search.as_deref().map_or(true, |term| {
            self.title.to_lowercase().contains(&term.to_lowercase())
        });
        let category_ok = filter
            .category_id
            .map_or(true, |wanted| self.category_id == Some(wanted));
        let owner_ok = filter.user_id.map_or(true, |wanted| self.user_id == wanted);
        title_ok && category_ok && owner_ok
    }
}

impl Tables {
    /// Join a post with its owner and category, like the SQL read does.
    fn post(&self, record: &PostRecord) -> Post {
        let user_name = self
            .users
            .iter()
            .find(|u| u.id == record.user_id)
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let category_name = record
            .category_id
            .and_then(|id| self.categories.iter().find(|c| c.id == id))
            .map(|c| c.name.clone());

        Post::from(PostRow {
            id: record.id,
            title: record.title.clone(),
            content: record.content.clone(),
            user_id: record.user_id,
            category_id: record.category_id,
            created_at: record.created_at,
            updated_at: record.updated_at,
            user_name,
            category_name,
        })
    }
}

fn next(seq: &mut DbId) -> DbId {
    *seq += 1;
    *seq
}

fn paginate<T: Clone>(items: &[T], page: PageRequest) -> Page<T> {
    let data = items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit() as usize)
        .cloned()
        .collect();
    Page::new(data, page, items.len() as i64)
}

/// In-memory [`BlogStore`] guarded by a `tokio::sync::Mutex`.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make post listing and health pings fail as if the database were down.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), sqlx::Error> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(sqlx::Error::PoolTimedOut)
        } else {
            Ok(())
        }
    }

    pub async fn post_count(&self) -> usize {
        self.tables.lock().await.posts.len()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn list_posts(
        &self,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, sqlx::Error> {
        self.check_available()?;
        let tables = self.tables.lock().await;
        let matching: Vec<Post> = tables
            .posts
            .iter()
            .filter(|p| p.matches(filter))
            .map(|p| tables.post(p))
            .collect();
        Ok(paginate(&matching, page))
    }

    async fn find_post(&self, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(tables
            .posts
            .iter()
            .find(|p| p.id == id)
            .map(|p| tables.post(p)))
    }

    async fn create_post(&self, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let record = PostRecord {
            id: next(&mut tables.post_seq),
            user_id: input.user_id,
            category_id: input.category_id,
            title: input.title.clone(),
            content: input.content.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.posts.push(record.clone());
        Ok(tables.post(&record))
    }

    async fn update_post(
        &self,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let Some(record) = tables.posts.iter_mut().find(|p| p.id == id) else {
            return Ok(None);
        };
        record.title = input.title.clone();
        record.content = input.content.clone();
        record.category_id = input.category.apply(record.category_id);
        record.updated_at = Utc::now();
        let record = record.clone();
        Ok(Some(tables.post(&record)))
    }

    async fn delete_post(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let before = tables.posts.len();
        tables.posts.retain(|p| p.id != id);
        Ok(tables.posts.len() < before)
    }
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn list_categories(&self, page: PageRequest) -> Result<Page<Category>, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(paginate(&tables.categories, page))
    }

    async fn find_category(&self, id: DbId) -> Result<Option<Category>, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.iter().find(|c| c.id == id).cloned())
    }

    async fn category_exists(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(tables.categories.iter().any(|c| c.id == id))
    }

    async fn category_name_taken(
        &self,
        name: &str,
        except: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(tables
            .categories
            .iter()
            .any(|c| c.name == name && Some(c.id) != except))
    }

    async fn create_category(&self, input: &CreateCategory) -> Result<Category, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let category = Category {
            id: next(&mut tables.category_seq),
            name: input.name.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.categories.push(category.clone());
        Ok(category)
    }

    async fn update_category(
        &self,
        id: DbId,
        input: &UpdateCategory,
    ) -> Result<Option<Category>, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        Ok(tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .map(|category| {
                category.name = input.name.clone();
                category.updated_at = Utc::now();
                category.clone()
            }))
    }

    async fn delete_category(&self, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let before = tables.categories.len();
        tables.categories.retain(|c| c.id != id);
        if tables.categories.len() == before {
            return Ok(false);
        }
        // ON DELETE SET NULL
        for post in tables.posts.iter_mut().filter(|p| p.category_id == Some(id)) {
            post.category_id = None;
        }
        Ok(true)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, input: &CreateUser) -> Result<User, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        let user = User {
            id: next(&mut tables.user_seq),
            name: input.name.clone(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        let tables = self.tables.lock().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl AccessTokenStore for MemoryStore {
    async fn create_access_token(
        &self,
        input: &CreateAccessToken,
    ) -> Result<AccessToken, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let token = AccessToken {
            id: next(&mut tables.token_seq),
            user_id: input.user_id,
            jti: input.jti.clone(),
            expires_at: input.expires_at,
            revoked_at: None,
            created_at: Utc::now(),
        };
        tables.tokens.push(token.clone());
        Ok(token)
    }

    async fn access_token_active(&self, jti: &str) -> Result<bool, sqlx::Error> {
        let tables = self.tables.lock().await;
        let now = Utc::now();
        Ok(tables
            .tokens
            .iter()
            .any(|t| t.jti == jti && t.revoked_at.is_none() && t.expires_at > now))
    }

    async fn revoke_access_token(&self, jti: &str) -> Result<bool, sqlx::Error> {
        let mut tables = self.tables.lock().await;
        let now = Utc::now();
        Ok(tables
            .tokens
            .iter_mut()
            .find(|t| t.jti == jti && t.revoked_at.is_none())
            .map(|t| t.revoked_at = Some(now))
            .is_some())
    }
}

#[async_trait]
impl BlogStore for MemoryStore {
    async fn ping(&self) -> Result<(), sqlx::Error> {
        self.check_available()
    }
}

// ---------------------------------------------------------------------------
// App construction
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        environment: Environment::Production,
        log_format: LogFormat::Pretty,
        database_max_connections: 1,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
    }
}

/// Build the full application router over `store`, exactly as `main.rs`
/// does over `PgStore`.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    build_test_app_with(store, test_config())
}

pub fn build_test_app_with(store: Arc<MemoryStore>, config: ServerConfig) -> Router {
    let state = AppState::new(store, config.clone());
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Insert a user directly. The password hash is a placeholder, so this user
/// cannot log in; use the register endpoint for that.
pub async fn seed_user(store: &MemoryStore, name: &str) -> User {
    store
        .create_user(&CreateUser {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            password_hash: "!".to_string(),
        })
        .await
        .expect("seeding a user should succeed")
}

/// Issue and record a bearer token for `user_id`.
pub async fn token_for(store: &MemoryStore, user_id: DbId) -> String {
    let issued = generate_access_token(user_id, &test_config().jwt)
        .expect("token generation should succeed");
    store
        .create_access_token(&CreateAccessToken {
            user_id,
            jti: issued.claims.jti.clone(),
            expires_at: issued.claims.expires_at().expect("expiry in range"),
        })
        .await
        .expect("recording a token should succeed");
    issued.token
}

/// Seed a user and return it along with a valid token.
pub async fn signed_in(store: &MemoryStore, name: &str) -> (User, String) {
    let user = seed_user(store, name).await;
    let token = token_for(store, user.id).await;
    (user, token)
}

pub async fn seed_category(store: &MemoryStore, name: &str) -> Category {
    store
        .create_category(&CreateCategory {
            name: name.to_string(),
        })
        .await
        .expect("seeding a category should succeed")
}

pub async fn seed_post(
    store: &MemoryStore,
    user_id: DbId,
    title: &str,
    category_id: Option<DbId>,
) -> Post {
    store
        .create_post(&CreatePost {
            user_id,
            title: title.to_string(),
            content: format!("Body of {title}"),
            category_id,
        })
        .await
        .expect("seeding a post should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.expect("router is infallible")
}

fn request(method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, None, None)).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::GET, uri, Some(token), None)).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    send(app, request(Method::POST, uri, None, Some(body))).await
}

pub async fn post_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), Some(body))).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::POST, uri, Some(token), None)).await
}

pub async fn put_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::PUT, uri, Some(token), Some(body))).await
}

pub async fn patch_json_auth(app: Router, uri: &str, body: Value, token: &str) -> Response<Body> {
    send(app, request(Method::PATCH, uri, Some(token), Some(body))).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, request(Method::DELETE, uri, Some(token), None)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .expect("body should be readable")
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = body_bytes(response).await;
    serde_json::from_slice(&bytes).expect("body should be JSON")
}
