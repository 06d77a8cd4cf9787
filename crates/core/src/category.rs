//! Category input validation.

use serde_json::Value;

use crate::error::CoreError;
use crate::validation::{messages, FieldErrors, Fields};

/// Maximum category name length, in characters.
pub const NAME_MAX_CHARS: u64 = 255;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFields {
    pub name: String,
}

/// A category body awaiting the name-uniqueness check.
#[derive(Debug)]
pub struct CategoryInput {
    name: Option<String>,
    errors: FieldErrors,
}

impl CategoryInput {
    pub fn parse(body: &Value) -> Self {
        let mut fields = Fields::new(body);
        let name = fields.bounded_string("name", None, Some(NAME_MAX_CHARS));
        Self {
            name,
            errors: fields.into_errors(),
        }
    }

    /// The name that must not already belong to another category.
    pub fn name_to_verify(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn reject_taken_name(&mut self) {
        self.errors.add("name", messages::unique("name"));
        self.name = None;
    }

    pub fn finish(self) -> Result<CategoryFields, CoreError> {
        match self.name {
            Some(name) if self.errors.is_empty() => Ok(CategoryFields { name }),
            _ => Err(CoreError::Validation(self.errors)),
        }
    }
}
