use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use lazy_static::lazy_static;
use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::{AppError, FieldError};

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref UPPER_RE: Regex = Regex::new(r"[A-Z]").unwrap();
    static ref LOWER_RE: Regex = Regex::new(r"[a-z]").unwrap();
    static ref DIGIT_RE: Regex = Regex::new(r"[0-9]").unwrap();
    static ref SYMBOL_RE: Regex = Regex::new(r"[^A-Za-z0-9]").unwrap();
}

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Request bodies that check their own fields after deserialization.
pub trait Validate {
    fn validate(&self) -> Result<(), Vec<FieldError>>;
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn check_name(errors: &mut Vec<FieldError>, name: &str) {
    if name.chars().count() < MIN_NAME_LEN {
        errors.push(FieldError::new(
            "name",
            format!("Name must be at least {MIN_NAME_LEN} characters"),
        ));
    }
}

pub fn check_email(errors: &mut Vec<FieldError>, email: &str) {
    if !is_valid_email(email) {
        errors.push(FieldError::new("email", "Invalid email"));
    }
}

/// Pushes one error per unmet password rule.
pub fn check_password_strength(errors: &mut Vec<FieldError>, field: &'static str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LEN {
        errors.push(FieldError::new(
            field,
            format!("Password must be at least {MIN_PASSWORD_LEN} characters"),
        ));
    }
    let rules: [(&Regex, &str); 4] = [
        (&*UPPER_RE, "Password must contain at least one uppercase letter"),
        (&*LOWER_RE, "Password must contain at least one lowercase letter"),
        (&*DIGIT_RE, "Password must contain at least one number"),
        (&*SYMBOL_RE, "Password must contain at least one special character"),
    ];
    for (re, message) in rules {
        if !re.is_match(password) {
            errors.push(FieldError::new(field, message));
        }
    }
}

pub fn check_required(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.is_empty() {
        errors.push(FieldError::new(field, format!("{field} is required")));
    }
}

pub fn finish(errors: Vec<FieldError>) -> Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// JSON body extractor that rejects with [`AppError`] and runs [`Validate`].
pub struct ValidJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            warn!(error = %rejection.body_text(), "rejected request body");
            AppError::BadRequest(rejection.body_text())
        })?;
        value.validate().map_err(AppError::Validation)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn password_errors(password: &str) -> Vec<String> {
        let mut errors = Vec::new();
        check_password_strength(&mut errors, "password", password);
        errors.into_iter().map(|e| e.message).collect()
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("jo@x.com"));
        assert!(is_valid_email("first.last+tag@sub.example.org"));
        assert!(!is_valid_email("jo@x"));
        assert!(!is_valid_email("jo x@x.com"));
        assert!(!is_valid_email("@x.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn strong_password_passes() {
        assert!(password_errors("Abcdef1!").is_empty());
    }

    #[test]
    fn each_missing_class_is_reported() {
        assert_eq!(
            password_errors("abcdef1!"),
            vec!["Password must contain at least one uppercase letter"]
        );
        assert_eq!(
            password_errors("ABCDEF1!"),
            vec!["Password must contain at least one lowercase letter"]
        );
        assert_eq!(
            password_errors("Abcdefg!"),
            vec!["Password must contain at least one number"]
        );
        assert_eq!(
            password_errors("Abcdefg1"),
            vec!["Password must contain at least one special character"]
        );
    }

    #[test]
    fn short_password_reports_length() {
        let errors = password_errors("Ab1!");
        assert_eq!(errors, vec!["Password must be at least 8 characters"]);
    }

    #[test]
    fn name_length_counts_chars() {
        let mut errors = Vec::new();
        check_name(&mut errors, "J");
        assert_eq!(errors.len(), 1);
        let mut errors = Vec::new();
        check_name(&mut errors, "Jö");
        assert!(errors.is_empty());
    }

    #[test]
    fn required_field() {
        let mut errors = Vec::new();
        check_required(&mut errors, "token", "");
        assert_eq!(errors, vec![FieldError::new("token", "token is required")]);
        assert!(finish(Vec::new()).is_ok());
    }
}
