//! Category entity model and DTOs.

use inkpost_core::category::CategoryFields;
use inkpost_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `categories` table. Serialized as-is in responses.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct Category {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new category.
#[derive(Debug, Clone)]
pub struct CreateCategory {
    pub name: String,
}

/// DTO for renaming a category.
#[derive(Debug, Clone)]
pub struct UpdateCategory {
    pub name: String,
}

impl From<CategoryFields> for CreateCategory {
    fn from(fields: CategoryFields) -> Self {
        Self { name: fields.name }
    }
}

impl From<CategoryFields> for UpdateCategory {
    fn from(fields: CategoryFields) -> Self {
        Self { name: fields.name }
    }
}
