//! Named validation schemas for the write flows.
//!
//! Each form deserializes from the request body and `clean()`s into a typed
//! value. Failures are collected per field and reported together as
//! [`DomainError::Validation`].

use std::fmt::Display;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::error::DomainError;

pub const TITLE_MAX_CHARS: usize = 256;
pub const IMAGE_MAX_CHARS: usize = 255;
pub const NAME_MAX_CHARS: usize = 150;
pub const EMAIL_MAX_CHARS: usize = 254;
pub const PASSWORD_MIN_CHARS: usize = 8;

/// Accumulates `field: message` errors.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<String>);

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: impl Display) {
        self.0.push(format!("{field}: {message}"));
    }

    pub fn required(&mut self, field: &str, value: &str) {
        if value.trim().is_empty() {
            self.add(field, "this field is required");
        }
    }

    pub fn max_chars(&mut self, field: &str, value: &str, max: usize) {
        if value.chars().count() > max {
            self.add(field, format_args!("must be at most {max} characters"));
        }
    }

    /// Return `value` when no error was recorded.
    pub fn finish<T>(self, value: T) -> Result<T, DomainError> {
        if self.0.is_empty() {
            Ok(value)
        } else {
            Err(DomainError::Validation(self.0))
        }
    }
}

/// Accepts RFC 3339, or the `datetime-local` shape `YYYY-MM-DDTHH:MM[:SS]`
/// read as UTC.
pub fn parse_pub_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|naive| naive.and_utc())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn check_username(errors: &mut FieldErrors, username: &str) {
    errors.required("username", username);
    errors.max_chars("username", username, NAME_MAX_CHARS);
    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || "@.+-_".contains(c))
    {
        errors.add(
            "username",
            "may contain only letters, digits and @/./+/-/_",
        );
    }
}

fn check_email(errors: &mut FieldErrors, email: &str) {
    if email.is_empty() {
        return;
    }
    errors.max_chars("email", email, EMAIL_MAX_CHARS);
    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && domain.contains('.'));
    if !valid {
        errors.add("email", "enter a valid email address");
    }
}

/// Post create/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    pub pub_date: Option<String>,
    /// Category slug.
    pub category: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

/// A validated [`PostForm`]. The category is still an unresolved slug.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanPost {
    pub title: String,
    pub text: String,
    pub pub_date: Option<DateTime<Utc>>,
    pub category_slug: Option<String>,
    pub image: Option<String>,
    pub is_published: Option<bool>,
}

impl PostForm {
    pub fn clean(self) -> Result<CleanPost, DomainError> {
        let mut errors = FieldErrors::default();

        let title = self.title.trim().to_string();
        errors.required("title", &title);
        errors.max_chars("title", &title, TITLE_MAX_CHARS);
        errors.required("text", &self.text);

        let pub_date = match non_blank(self.pub_date) {
            Some(raw) => {
                let parsed = parse_pub_date(&raw);
                if parsed.is_none() {
                    errors.add("pub_date", "enter a valid date/time");
                }
                parsed
            }
            None => None,
        };

        let image = non_blank(self.image);
        if let Some(image) = &image {
            errors.max_chars("image", image, IMAGE_MAX_CHARS);
        }

        errors.finish(CleanPost {
            title,
            text: self.text,
            pub_date,
            category_slug: non_blank(self.category),
            image,
            is_published: self.is_published,
        })
    }
}

/// Comment add/edit form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentForm {
    #[serde(default)]
    pub text: String,
}

impl CommentForm {
    /// Returns the trimmed comment text.
    pub fn clean(self) -> Result<String, DomainError> {
        let mut errors = FieldErrors::default();
        let text = self.text.trim().to_string();
        if text.is_empty() {
            errors.add("text", "comment text must not be empty");
        }
        errors.finish(text)
    }
}

/// Profile edit form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ProfileForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub username: String,
}

impl ProfileForm {
    pub fn clean(self) -> Result<ProfileForm, DomainError> {
        let mut errors = FieldErrors::default();
        let form = ProfileForm {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            username: self.username.trim().to_string(),
        };

        check_username(&mut errors, &form.username);
        check_email(&mut errors, &form.email);
        errors.max_chars("first_name", &form.first_name, NAME_MAX_CHARS);
        errors.max_chars("last_name", &form.last_name, NAME_MAX_CHARS);

        errors.finish(form)
    }
}

/// Sign-up form.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

/// A validated [`RegistrationForm`], password still in clear text.
#[derive(Debug, Clone)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegistrationForm {
    pub fn clean(self) -> Result<Registration, DomainError> {
        let mut errors = FieldErrors::default();
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_string();

        check_username(&mut errors, &username);
        check_email(&mut errors, &email);
        if self.password.chars().count() < PASSWORD_MIN_CHARS {
            errors.add(
                "password",
                format_args!("must be at least {PASSWORD_MIN_CHARS} characters"),
            );
        }
        if self.password != self.password_confirm {
            errors.add("password_confirm", "passwords do not match");
        }

        errors.finish(Registration {
            username,
            email,
            password: self.password,
        })
    }
}
