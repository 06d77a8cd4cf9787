//! Field-level request validation.
//!
//! Request bodies arrive as untyped JSON so that "missing", "null" and
//! "wrong type" can be told apart. [`Fields`] reads an allow-listed set of
//! keys out of such a body and records every violation in a [`FieldErrors`]
//! map; it never stops at the first failing field.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};
use validator::{ValidateEmail, ValidateLength};

use crate::types::DbId;

/// Violations keyed by field name, each with one or more messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of fields with at least one violation.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }
}

/// Client-facing violation messages.
pub mod messages {
    /// `category_id` reads as "category id" in messages.
    fn label(field: &str) -> String {
        field.replace('_', " ")
    }

    pub fn required(field: &str) -> String {
        format!("The {} field is required.", label(field))
    }

    pub fn string(field: &str) -> String {
        format!("The {} field must be a string.", label(field))
    }

    pub fn max_chars(field: &str, max: u64) -> String {
        format!(
            "The {} field must not be greater than {max} characters.",
            label(field)
        )
    }

    pub fn min_chars(field: &str, min: u64) -> String {
        format!("The {} field must be at least {min} characters.", label(field))
    }

    pub fn email(field: &str) -> String {
        format!("The {} field must be a valid email address.", label(field))
    }

    pub fn exists(field: &str) -> String {
        format!("The selected {} is invalid.", label(field))
    }

    pub fn unique(field: &str) -> String {
        format!("The {} has already been taken.", label(field))
    }
}

/// Outcome of reading an optional foreign-key field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdField {
    /// Key not present in the body.
    Absent,
    /// Present as `null` (or an empty string).
    Null,
    Id(DbId),
    /// Present but not a usable id; an error has already been recorded.
    Invalid,
}

/// Cursor over a JSON request body that accumulates violations.
///
/// A body that is not a JSON object behaves like an empty object, so every
/// required field reports as missing.
pub struct Fields<'a> {
    body: Option<&'a Map<String, Value>>,
    errors: FieldErrors,
}

impl<'a> Fields<'a> {
    pub fn new(body: &'a Value) -> Self {
        Self {
            body: body.as_object(),
            errors: FieldErrors::new(),
        }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.body.and_then(|map| map.get(field))
    }

    /// `required|string`. Surrounding whitespace is trimmed and a blank
    /// value counts as missing.
    pub fn required_string(&mut self, field: &str) -> Option<String> {
        match self.get(field) {
            Some(Value::String(raw)) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    self.errors.add(field, messages::required(field));
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
            None | Some(Value::Null) => {
                self.errors.add(field, messages::required(field));
                None
            }
            Some(_) => {
                self.errors.add(field, messages::string(field));
                None
            }
        }
    }

    /// `required|string` plus optional character-count bounds.
    pub fn bounded_string(
        &mut self,
        field: &str,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Option<String> {
        let value = self.required_string(field)?;
        self.check_length(field, value, min, max)
    }

    /// `required|string|email|max:N`.
    pub fn email(&mut self, field: &str, max: u64) -> Option<String> {
        let value = self.bounded_string(field, None, Some(max))?;
        if !value.validate_email() {
            self.errors.add(field, messages::email(field));
            return None;
        }
        Some(value)
    }

    /// Like [`Self::bounded_string`] but the value is kept verbatim
    /// (passwords are never trimmed).
    pub fn secret(&mut self, field: &str, min: Option<u64>) -> Option<String> {
        match self.get(field) {
            Some(Value::String(raw)) if !raw.is_empty() => {
                self.check_length(field, raw.clone(), min, None)
            }
            None | Some(Value::Null) | Some(Value::String(_)) => {
                self.errors.add(field, messages::required(field));
                None
            }
            Some(_) => {
                self.errors.add(field, messages::string(field));
                None
            }
        }
    }

    /// `nullable` foreign key. Existence is checked later against the store.
    pub fn nullable_id(&mut self, field: &str) -> IdField {
        match self.get(field) {
            None => IdField::Absent,
            Some(Value::Null) => IdField::Null,
            Some(Value::String(s)) if s.trim().is_empty() => IdField::Null,
            Some(value) => match parse_id(value) {
                Some(id) => IdField::Id(id),
                None => {
                    self.errors.add(field, messages::exists(field));
                    IdField::Invalid
                }
            },
        }
    }

    pub fn into_errors(self) -> FieldErrors {
        self.errors
    }

    fn check_length(
        &mut self,
        field: &str,
        value: String,
        min: Option<u64>,
        max: Option<u64>,
    ) -> Option<String> {
        if let Some(min) = min {
            if !value.validate_length(Some(min), None, None) {
                self.errors.add(field, messages::min_chars(field, min));
                return None;
            }
        }
        if let Some(max) = max {
            if !value.validate_length(None, Some(max), None) {
                self.errors.add(field, messages::max_chars(field, max));
                return None;
            }
        }
        Some(value)
    }
}

/// Accept a positive JSON integer or a numeric string as an id.
pub fn parse_id(value: &Value) -> Option<DbId> {
    let id = match value {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => parse_id_str(s)?,
        _ => return None,
    };
    (id > 0).then_some(id)
}

/// Parse an id from a query-string or path segment.
pub fn parse_id_str(raw: &str) -> Option<DbId> {
    raw.trim().parse::<DbId>().ok().filter(|id| *id > 0)
}
