//! Post input validation and list filters.

use serde_json::Value;

use crate::error::CoreError;
use crate::types::DbId;
use crate::validation::{messages, parse_id_str, FieldErrors, Fields, IdField};

/// Maximum post title length, in characters.
pub const TITLE_MAX_CHARS: u64 = 255;

/// What a create/update request asks to do with the post's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryAssignment {
    /// `category_id` was absent: leave it as it is (no category on create).
    Keep,
    /// `category_id` was `null`.
    Clear,
    Set(DbId),
}

impl CategoryAssignment {
    /// The category a brand-new post starts with.
    pub fn initial(self) -> Option<DbId> {
        match self {
            Self::Set(id) => Some(id),
            Self::Keep | Self::Clear => None,
        }
    }

    /// Apply this assignment to a post's current category.
    pub fn apply(self, current: Option<DbId>) -> Option<DbId> {
        match self {
            Self::Keep => current,
            Self::Clear => None,
            Self::Set(id) => Some(id),
        }
    }
}

/// Validated, allow-listed post fields. The owner is never part of this:
/// it always comes from the authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostFields {
    pub title: String,
    pub content: String,
    pub category: CategoryAssignment,
}

/// A post body that has passed the shape checks but may still need its
/// `category_id` confirmed against the store.
///
/// ```ignore
/// let mut input = PostInput::parse(&body);
/// if let Some(id) = input.category_to_verify() {
///     if !store.category_exists(id).await? {
///         input.reject_category();
///     }
/// }
/// let fields = input.finish()?;
/// ```
#[derive(Debug)]
pub struct PostInput {
    title: Option<String>,
    content: Option<String>,
    category: IdField,
    errors: FieldErrors,
}

impl PostInput {
    /// Read `title`, `content` and `category_id`; every other key is ignored.
    pub fn parse(body: &Value) -> Self {
        let mut fields = Fields::new(body);
        let title = fields.bounded_string("title", None, Some(TITLE_MAX_CHARS));
        let content = fields.required_string("content");
        let category = fields.nullable_id("category_id");
        Self {
            title,
            content,
            category,
            errors: fields.into_errors(),
        }
    }

    /// The category id that must exist for the input to be valid.
    pub fn category_to_verify(&self) -> Option<DbId> {
        match self.category {
            IdField::Id(id) => Some(id),
            _ => None,
        }
    }

    /// Mark the referenced category as nonexistent.
    pub fn reject_category(&mut self) {
        self.errors
            .add("category_id", messages::exists("category_id"));
        self.category = IdField::Invalid;
    }

    pub fn finish(self) -> Result<PostFields, CoreError> {
        let category = match self.category {
            IdField::Absent => Some(CategoryAssignment::Keep),
            IdField::Null => Some(CategoryAssignment::Clear),
            IdField::Id(id) => Some(CategoryAssignment::Set(id)),
            IdField::Invalid => None,
        };

        match (self.title, self.content, category) {
            (Some(title), Some(content), Some(category)) if self.errors.is_empty() => {
                Ok(PostFields {
                    title,
                    content,
                    category,
                })
            }
            _ => Err(CoreError::Validation(self.errors)),
        }
    }
}

/// Post list filters. All set filters must hold (logical AND); unset
/// filters impose no constraint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostFilter {
    /// Case-insensitive substring of the title.
    pub search: Option<String>,
    pub category_id: Option<DbId>,
    /// Owner.
    pub user_id: Option<DbId>,
}

impl PostFilter {
    /// Build filters from raw query-string values.
    ///
    /// Blank values are treated as absent. Returns `None` when an id filter
    /// is present but not a valid id, since such a filter cannot match any
    /// post.
    pub fn from_query(
        search: Option<&str>,
        category_id: Option<&str>,
        user_id: Option<&str>,
    ) -> Option<Self> {
        fn id_filter(raw: Option<&str>) -> Result<Option<DbId>, ()> {
            match raw.map(str::trim) {
                None | Some("") => Ok(None),
                Some(value) => parse_id_str(value).map(Some).ok_or(()),
            }
        }

        let search = search
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Some(Self {
            search,
            category_id: id_filter(category_id).ok()?,
            user_id: id_filter(user_id).ok()?,
        })
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn category(mut self, category_id: DbId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn owner(mut self, user_id: DbId) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// `LIKE` pattern for the title search with the search term's own
    /// wildcard characters escaped.
    pub fn title_pattern(&self) -> Option<String> {
        self.search
            .as_deref()
            .map(|s| format!("%{}%", escape_like(s)))
    }
}

/// Escape `\`, `%` and `_` so they match literally inside a `LIKE` pattern.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
