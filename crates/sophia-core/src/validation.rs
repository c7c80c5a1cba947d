//! Input validation for user-supplied fields.
//!
//! Each validator trims its input, checks the rules of the matching form
//! and returns the cleaned value. All failures for one form are
//! reported together in a single [`CoreError::Validation`], separated by `; `.
//! Lengths are measured in characters, not bytes.

use std::sync::LazyLock;

use regex::Regex;

use crate::errors::CoreError;
use crate::tags::{MAX_TAGS_LEN, join_tags, normalize_tags};

pub const MAX_USERNAME_LEN: usize = 64;
pub const MAX_EMAIL_LEN: usize = 120;
pub const MAX_TITLE_LEN: usize = 140;
pub const MAX_COLLECTION_NAME_LEN: usize = 100;
pub const MIN_PROMPT_LEN: usize = 10;
pub const MAX_PROMPT_LEN: usize = 500;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is a valid regex")
});

/// Cleaned registration input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Default)]
struct Errors(Vec<String>);

impl Errors {
    fn push(&mut self, msg: impl Into<String>) {
        self.0.push(msg.into());
    }

    fn finish(self) -> Result<(), CoreError> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(CoreError::Validation(self.0.join("; ")))
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn required(errors: &mut Errors, field: &str, value: &str) -> bool {
    if value.trim().is_empty() {
        errors.push(format!("{field} is required"));
        return false;
    }
    true
}

fn length(errors: &mut Errors, field: &str, value: &str, min: usize, max: usize) {
    let len = char_len(value);
    if len < min || len > max {
        errors.push(format!("{field} must be between {min} and {max} characters"));
    }
}

/// Validate the registration form. Uniqueness is checked by the database layer.
pub fn registration(
    username: &str,
    email: &str,
    password: &str,
    password2: &str,
) -> Result<Registration, CoreError> {
    let username = username.trim();
    let email = email.trim();
    let mut errors = Errors::default();

    if required(&mut errors, "username", username) {
        length(&mut errors, "username", username, 1, MAX_USERNAME_LEN);
    }
    if required(&mut errors, "email", email) {
        if char_len(email) > MAX_EMAIL_LEN {
            errors.push(format!("email must be at most {MAX_EMAIL_LEN} characters"));
        } else if !is_valid_email(email) {
            errors.push("invalid email address");
        }
    }
    let has_password = required(&mut errors, "password", password);
    if required(&mut errors, "repeat password", password2) && has_password && password != password2
    {
        errors.push("passwords must match");
    }

    errors.finish()?;
    Ok(Registration {
        username: username.to_string(),
        email: email.to_string(),
        password: password.to_string(),
    })
}

/// Validate the login form (presence only; credentials are checked later).
pub fn login(username: &str, password: &str) -> Result<String, CoreError> {
    let username = username.trim();
    let mut errors = Errors::default();
    required(&mut errors, "username", username);
    required(&mut errors, "password", password);
    errors.finish()?;
    Ok(username.to_string())
}

/// Validate snippet title and code. Returns the trimmed title.
pub fn snippet(title: &str, code: &str) -> Result<String, CoreError> {
    let title = title.trim();
    let mut errors = Errors::default();
    if required(&mut errors, "title", title) {
        length(&mut errors, "title", title, 1, MAX_TITLE_LEN);
    }
    required(&mut errors, "code", code);
    errors.finish()?;
    Ok(title.to_string())
}

/// Normalise a raw tag string and enforce the stored length limit.
pub fn tags(raw: &str) -> Result<Vec<String>, CoreError> {
    let tags = normalize_tags(raw);
    if char_len(&join_tags(&tags)) > MAX_TAGS_LEN {
        return Err(CoreError::Validation(format!(
            "tags must be at most {MAX_TAGS_LEN} characters"
        )));
    }
    Ok(tags)
}

/// Validate an AI code-generation prompt.
pub fn ai_prompt(prompt: &str) -> Result<String, CoreError> {
    let prompt = prompt.trim();
    let mut errors = Errors::default();
    if required(&mut errors, "prompt", prompt) {
        length(&mut errors, "prompt", prompt, MIN_PROMPT_LEN, MAX_PROMPT_LEN);
    }
    errors.finish()?;
    Ok(prompt.to_string())
}

/// Validate a collection name.
pub fn collection_name(name: &str) -> Result<String, CoreError> {
    let name = name.trim();
    let mut errors = Errors::default();
    if required(&mut errors, "collection name", name) {
        length(&mut errors, "collection name", name, 1, MAX_COLLECTION_NAME_LEN);
    }
    errors.finish()?;
    Ok(name.to_string())
}

#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL.is_match(email)
}
