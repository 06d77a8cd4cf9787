//! Registration and login input validation.

use serde_json::Value;

use crate::error::CoreError;
use crate::validation::{messages, FieldErrors, Fields};

pub const NAME_MAX_CHARS: u64 = 255;
pub const EMAIL_MAX_CHARS: u64 = 255;
pub const PASSWORD_MIN_CHARS: u64 = 8;

/// A validated registration request. The password is still plaintext.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A registration body awaiting the email-uniqueness check.
#[derive(Debug)]
pub struct RegistrationInput {
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
    errors: FieldErrors,
}

impl RegistrationInput {
    pub fn parse(body: &Value) -> Self {
        let mut fields = Fields::new(body);
        let name = fields.bounded_string("name", None, Some(NAME_MAX_CHARS));
        let email = fields.email("email", EMAIL_MAX_CHARS);
        let password = fields.secret("password", Some(PASSWORD_MIN_CHARS));
        Self {
            name,
            email,
            password,
            errors: fields.into_errors(),
        }
    }

    pub fn email_to_verify(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn reject_taken_email(&mut self) {
        self.errors.add("email", messages::unique("email"));
        self.email = None;
    }

    pub fn finish(self) -> Result<Registration, CoreError> {
        match (self.name, self.email, self.password) {
            (Some(name), Some(email), Some(password)) if self.errors.is_empty() => {
                Ok(Registration {
                    name,
                    email,
                    password,
                })
            }
            _ => Err(CoreError::Validation(self.errors)),
        }
    }
}

/// Login credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn parse(body: &Value) -> Result<Self, CoreError> {
        let mut fields = Fields::new(body);
        let email = fields.required_string("email");
        let password = fields.secret("password", None);
        match (email, password) {
            (Some(email), Some(password)) => Ok(Self { email, password }),
            _ => Err(CoreError::Validation(fields.into_errors())),
        }
    }
}
