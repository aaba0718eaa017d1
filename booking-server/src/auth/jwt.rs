//! JWT token service
//!
//! Token generation, validation and the [`CurrentUser`] request context.

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::Rng;
use serde::{Deserialize, Serialize};
use shared::models::{UserInfo, UserRole};
use thiserror::Error;

/// JWT configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Signing secret (at least 32 bytes)
    pub secret: String,
    /// Token lifetime in minutes
    pub expiration_minutes: i64,
    pub issuer: String,
    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: load_jwt_secret(),
            expiration_minutes: std::env::var("JWT_EXPIRATION_MINUTES")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1440),
            issuer: std::env::var("JWT_ISSUER").unwrap_or_else(|_| "booking-server".to_string()),
            audience: std::env::var("JWT_AUDIENCE")
                .unwrap_or_else(|_| "booking-clients".to_string()),
        }
    }
}

/// Claims stored in the token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (subject)
    pub sub: String,
    pub email: String,
    pub display_name: String,
    /// Role claim: "user" | "admin"
    pub role: String,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
}

#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token expired")]
    ExpiredToken,

    #[error("Invalid signature")]
    InvalidSignature,

    #[error("Token generation failed: {0}")]
    GenerationFailed(String),
}

/// Generate a printable random secret (development fallback)
fn generate_dev_secret() -> String {
    const CHARSET: &[u8] =
        b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789!@#$%^&*()-_=+";
    let mut rng = rand::thread_rng();
    (0..64)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect()
}

/// Load the JWT secret from the environment, or generate a temporary one in
/// development builds.
fn load_jwt_secret() -> String {
    match std::env::var("JWT_SECRET") {
        Ok(secret) if secret.len() >= 32 => secret,
        Ok(_) => {
            panic!("JWT_SECRET must be at least 32 characters long");
        }
        Err(_) => {
            #[cfg(debug_assertions)]
            {
                tracing::warn!("JWT_SECRET not set, generating temporary development key");
                generate_dev_secret()
            }
            #[cfg(not(debug_assertions))]
            {
                panic!("JWT_SECRET environment variable must be set in production");
            }
        }
    }
}

/// JWT token service
#[derive(Clone)]
pub struct JwtService {
    pub config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    pub fn new() -> Self {
        Self::with_config(JwtConfig::default())
    }

    pub fn with_config(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Generate a token for a user
    pub fn generate_token(&self, user: &UserInfo) -> Result<String, JwtError> {
        let now = Utc::now();
        let expiration = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            role: user.role.as_str().to_string(),
            exp: expiration.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
            aud: self.config.audience.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::GenerationFailed(e.to_string()))
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["sub", "exp", "iat", "iss", "aud"]);

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::ExpiredToken,
                ErrorKind::InvalidSignature => JwtError::InvalidSignature,
                _ => JwtError::InvalidToken(e.to_string()),
            }
        })?;

        Ok(token_data.claims)
    }

    /// Extract the token from an Authorization header
    pub fn extract_from_header(header: &str) -> Option<&str> {
        header.strip_prefix("Bearer ")
    }

    /// Seconds until expiry
    pub fn get_expiration_seconds(&self, claims: &Claims) -> i64 {
        let now = Utc::now().timestamp();
        (claims.exp - now).max(0)
    }
}

impl Default for JwtService {
    fn default() -> Self {
        Self::new()
    }
}

/// Current user context, parsed from JWT claims by the auth middleware and
/// injected into request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
    pub email: String,
    pub display_name: String,
    pub role: UserRole,
}

impl TryFrom<Claims> for CurrentUser {
    type Error = JwtError;

    fn try_from(claims: Claims) -> Result<Self, JwtError> {
        let id = claims
            .sub
            .parse::<i64>()
            .map_err(|_| JwtError::InvalidToken("Malformed subject claim".to_string()))?;
        let role = UserRole::parse(&claims.role)
            .ok_or_else(|| JwtError::InvalidToken("Unknown role claim".to_string()))?;

        Ok(Self {
            id,
            email: claims.email,
            display_name: claims.display_name,
            role,
        })
    }
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// The actor shape the booking lifecycle consumes
    pub fn actor(&self) -> crate::booking::Actor {
        crate::booking::Actor::new(self.id, self.role)
    }

    /// Outward-facing view
    pub fn info(&self) -> UserInfo {
        UserInfo {
            id: self.id,
            email: self.email.clone(),
            display_name: self.display_name.clone(),
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> JwtService {
        JwtService::with_config(JwtConfig {
            secret: "test-secret-test-secret-test-secret!!".to_string(),
            expiration_minutes: 60,
            issuer: "booking-server".to_string(),
            audience: "booking-clients".to_string(),
        })
    }

    fn test_user() -> UserInfo {
        UserInfo {
            id: 42,
            email: "jane@example.com".to_string(),
            display_name: "Jane".to_string(),
            role: UserRole::User,
        }
    }

    #[test]
    fn generate_and_validate_round_trip() {
        let service = test_service();
        let token = service.generate_token(&test_user()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.role, "user");

        let user = CurrentUser::try_from(claims).unwrap();
        assert_eq!(user.id, 42);
        assert!(!user.is_admin());
    }

    #[test]
    fn rejects_token_from_other_secret() {
        let service = test_service();
        let other = JwtService::with_config(JwtConfig {
            secret: "another-secret-another-secret-another!".to_string(),
            ..service.config.clone()
        });
        let token = other.generate_token(&test_user()).unwrap();
        assert!(service.validate_token(&token).is_err());
    }

    #[test]
    fn rejects_malformed_role_claim() {
        let service = test_service();
        let token = service.generate_token(&test_user()).unwrap();
        let mut claims = service.validate_token(&token).unwrap();
        claims.role = "superuser".to_string();
        assert!(CurrentUser::try_from(claims).is_err());
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(JwtService::extract_from_header("Bearer abc"), Some("abc"));
        assert_eq!(JwtService::extract_from_header("Basic abc"), None);
    }
}
