//! Post entity model and DTOs.
//!
//! Posts are always read together with their owner's name and their
//! category's name, so the response can embed both without extra queries.

use inkpost_core::policy::Owned;
use inkpost_core::post::{CategoryAssignment, PostFields};
use inkpost_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Owner summary embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostAuthor {
    pub id: DbId,
    pub name: String,
}

/// Category summary embedded in a post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostCategory {
    pub id: DbId,
    pub name: String,
}

/// A post with its relations loaded. This is the shape returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Post {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user: PostAuthor,
    pub category: Option<PostCategory>,
}

impl Owned for Post {
    fn owner_id(&self) -> DbId {
        self.user_id
    }
}

/// Flat row produced by joining `posts` with `users` and `categories`.
#[derive(Debug, Clone, FromRow)]
pub struct PostRow {
    pub id: DbId,
    pub title: String,
    pub content: String,
    pub user_id: DbId,
    pub category_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub user_name: String,
    pub category_name: Option<String>,
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        let category = match (row.category_id, row.category_name) {
            (Some(id), Some(name)) => Some(PostCategory { id, name }),
            _ => None,
        };
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            user_id: row.user_id,
            category_id: row.category_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
            user: PostAuthor {
                id: row.user_id,
                name: row.user_name,
            },
            category,
        }
    }
}

/// DTO for creating a new post.
#[derive(Debug, Clone)]
pub struct CreatePost {
    pub user_id: DbId,
    pub title: String,
    pub content: String,
    pub category_id: Option<DbId>,
}

impl CreatePost {
    /// The owner is always the authenticated caller, never a body field.
    pub fn new(user_id: DbId, fields: PostFields) -> Self {
        Self {
            user_id,
            title: fields.title,
            content: fields.content,
            category_id: fields.category.initial(),
        }
    }
}

/// DTO for updating a post. Owner and id are immutable.
#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub title: String,
    pub content: String,
    pub category: CategoryAssignment,
}

impl From<PostFields> for UpdatePost {
    fn from(fields: PostFields) -> Self {
        Self {
            title: fields.title,
            content: fields.content,
            category: fields.category,
        }
    }
}
