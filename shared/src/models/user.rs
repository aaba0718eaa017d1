//! User Model and auth payloads

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// User role
///
/// Assigned at registration (`user`) and immutable through normal flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
#[cfg_attr(feature = "db", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    User,
    Admin,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::User => "user",
            UserRole::Admin => "admin",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "user" => Some(UserRole::User),
            "admin" => Some(UserRole::Admin),
            _ => None,
        }
    }
}

/// User response (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
}

/// Registration payload
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[validate(email(message = "invalid email"))]
    pub email: String,
    #[validate(length(min = 6, message = "password must be at least 6 characters"))]
    pub password: String,
    #[validate(must_match(other = "password", message = "passwords do not match"))]
    pub confirm_password: String,
    #[validate(length(min = 1, message = "display name is required"))]
    pub display_name: String,
    /// Must be affirmatively set
    #[validate(custom(function = "validate_terms"))]
    pub accept_terms: bool,
}

/// Login payload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: UserInfo,
}

fn validate_terms(accepted: &bool) -> Result<(), ValidationError> {
    if *accepted {
        Ok(())
    } else {
        Err(ValidationError::new("accept_terms")
            .with_message("terms must be accepted".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_register() -> RegisterRequest {
        RegisterRequest {
            email: "jane@example.com".into(),
            password: "secret1".into(),
            confirm_password: "secret1".into(),
            display_name: "Jane".into(),
            accept_terms: true,
        }
    }

    #[test]
    fn accepts_valid_registration() {
        assert!(valid_register().validate().is_ok());
    }

    #[test]
    fn rejects_password_mismatch() {
        let mut payload = valid_register();
        payload.confirm_password = "different".into();
        let errs = payload.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("confirm_password"));
    }

    #[test]
    fn rejects_short_password() {
        let mut payload = valid_register();
        payload.password = "abc".into();
        payload.confirm_password = "abc".into();
        assert!(payload.validate().is_err());
    }

    #[test]
    fn rejects_unaccepted_terms() {
        let mut payload = valid_register();
        payload.accept_terms = false;
        let errs = payload.validate().unwrap_err();
        assert!(errs.field_errors().contains_key("accept_terms"));
    }
}
