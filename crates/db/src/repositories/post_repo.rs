//! Repository for the `posts` table.
//!
//! Every read joins the owner and the (optional) category so a [`Post`]
//! always carries both summaries.

use inkpost_core::pagination::{Page, PageRequest};
use inkpost_core::post::{CategoryAssignment, PostFilter};
use inkpost_core::types::DbId;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::models::post::{CreatePost, Post, PostRow, UpdatePost};

/// Select list and joins shared by every post read.
const DETAIL_SELECT: &str = "SELECT p.id, p.title, p.content, p.user_id, p.category_id, \
                             p.created_at, p.updated_at, u.name AS user_name, \
                             c.name AS category_name \
                             FROM posts p \
                             JOIN users u ON u.id = p.user_id \
                             LEFT JOIN categories c ON c.id = p.category_id";

/// Provides CRUD and filtered listing for posts.
pub struct PostRepo;

impl PostRepo {
    /// One page of posts matching `filter`, ordered by id ascending.
    pub async fn list(
        pool: &PgPool,
        filter: &PostFilter,
        page: PageRequest,
    ) -> Result<Page<Post>, sqlx::Error> {
        let mut count = count_query(filter);
        let total: i64 = count.build_query_scalar().fetch_one(pool).await?;

        let mut items = list_query(filter, page);
        let rows = items.build_query_as::<PostRow>().fetch_all(pool).await?;

        Ok(Page::new(
            rows.into_iter().map(Post::from).collect(),
            page,
            total,
        ))
    }

    /// Find a post by ID, with its owner and category.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Post>, sqlx::Error> {
        let query = format!("{DETAIL_SELECT} WHERE p.id = $1");
        let row = sqlx::query_as::<_, PostRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        Ok(row.map(Post::from))
    }

    /// Insert a new post and return it with relations loaded.
    pub async fn create(pool: &PgPool, input: &CreatePost) -> Result<Post, sqlx::Error> {
        let id: DbId = sqlx::query_scalar(
            "INSERT INTO posts (user_id, title, content, category_id)
             VALUES ($1, $2, $3, $4)
             RETURNING id",
        )
        .bind(input.user_id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(input.category_id)
        .fetch_one(pool)
        .await?;

        Self::find_by_id(pool, id)
            .await?
            .ok_or(sqlx::Error::RowNotFound)
    }

    /// Replace title and content and apply the category assignment.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdatePost,
    ) -> Result<Option<Post>, sqlx::Error> {
        let (replace_category, category_id) = match input.category {
            CategoryAssignment::Keep => (false, None),
            CategoryAssignment::Clear => (true, None),
            CategoryAssignment::Set(category_id) => (true, Some(category_id)),
        };

        let updated: Option<DbId> = sqlx::query_scalar(
            "UPDATE posts SET
                title = $2,
                content = $3,
                category_id = CASE WHEN $4 THEN $5 ELSE category_id END,
                updated_at = NOW()
             WHERE id = $1
             RETURNING id",
        )
        .bind(id)
        .bind(&input.title)
        .bind(&input.content)
        .bind(replace_category)
        .bind(category_id)
        .fetch_optional(pool)
        .await?;

        match updated {
            Some(id) => Self::find_by_id(pool, id).await,
            None => Ok(None),
        }
    }

    /// Delete a post by ID. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

fn count_query(filter: &PostFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM posts p");
    push_filters(&mut qb, filter);
    qb
}

fn list_query(filter: &PostFilter, page: PageRequest) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(DETAIL_SELECT);
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY p.id ASC LIMIT ")
        .push_bind(page.limit())
        .push(" OFFSET ")
        .push_bind(page.offset());
    qb
}

/// Append the `WHERE` clause shared by the list and count queries.
fn push_filters(qb: &mut QueryBuilder<'static, Postgres>, filter: &PostFilter) {
    qb.push(" WHERE TRUE");
    if let Some(pattern) = filter.title_pattern() {
        qb.push(" AND p.title ILIKE ").push_bind(pattern);
    }
    if let Some(category_id) = filter.category_id {
        qb.push(" AND p.category_id = ").push_bind(category_id);
    }
    if let Some(user_id) = filter.user_id {
        qb.push(" AND p.user_id = ").push_bind(user_id);
    }
}
