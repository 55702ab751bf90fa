//! JWT utilities for token generation and validation
//!
//! Provides access token creation and validation using HS256. Tokens expire
//! one hour after issuance and are never persisted; verification recomputes
//! the signature and checks the expiry on every request.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default access token expiration time (1 hour)
const TOKEN_EXPIRATION_MINUTES: i64 = 60;

/// JWT configuration
#[derive(Clone)]
pub struct JwtConfig {
    /// Secret key for signing tokens
    pub secret: String,
    /// Token expiration in minutes
    pub expiration_minutes: i64,
    /// Token issuer
    pub issuer: String,
}

impl JwtConfig {
    /// Create a new JWT configuration
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: TOKEN_EXPIRATION_MINUTES,
            issuer: "dungeonhub".to_string(),
        }
    }

    /// Create config from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let secret = std::env::var("JWT_SECRET").map_err(|_| JwtError::MissingSecret)?;

        let expiration = std::env::var("JWT_EXPIRATION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(TOKEN_EXPIRATION_MINUTES);

        let issuer = std::env::var("JWT_ISSUER").unwrap_or_else(|_| "dungeonhub".to_string());

        Ok(Self {
            secret,
            expiration_minutes: expiration,
            issuer,
        })
    }

    /// Set token expiration
    pub fn expiration(mut self, minutes: i64) -> Self {
        self.expiration_minutes = minutes;
        self
    }

    /// Set issuer
    pub fn issuer(mut self, issuer: impl Into<String>) -> Self {
        self.issuer = issuer.into();
        self
    }
}

/// JWT errors
#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT_SECRET environment variable not set")]
    MissingSecret,

    #[error("Token encoding failed: {0}")]
    EncodingError(String),

    #[error("Token decoding failed: {0}")]
    DecodingError(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    InvalidToken,
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => JwtError::Expired,
            ErrorKind::InvalidToken | ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                JwtError::InvalidToken
            }
            _ => JwtError::DecodingError(err.to_string()),
        }
    }
}

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (the account's login identifier)
    pub sub: String,
    /// Display name of the account
    pub user_name: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issuer
    pub iss: String,
    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

/// JWT service for token operations
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtService {
    /// Create a new JWT service
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Create JWT service from environment variables
    pub fn from_env() -> Result<Self, JwtError> {
        let config = JwtConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Issue an access token embedding the account identifier and display
    /// name, expiring one hour from now.
    pub fn issue(&self, account_id: &str, user_name: &str) -> Result<(String, i64), JwtError> {
        let now = Utc::now();
        let exp = now + Duration::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: account_id.to_string(),
            user_name: user_name.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            iss: self.config.issuer.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingError(e.to_string()))?;

        Ok((token, exp.timestamp()))
    }

    /// Validate and decode a token
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        // Set leeway to 0 for strict expiration checking
        validation.leeway = 0;

        let token_data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        let config = JwtConfig::new("test_secret_key_for_testing_only_32bytes!");
        JwtService::new(config)
    }

    // ========================================================================
    // JwtConfig Tests
    // ========================================================================

    #[test]
    fn test_jwt_config_new() {
        let config = JwtConfig::new("my_secret");

        assert_eq!(config.secret, "my_secret");
        assert_eq!(config.expiration_minutes, TOKEN_EXPIRATION_MINUTES);
        assert_eq!(config.issuer, "dungeonhub");
    }

    #[test]
    fn test_jwt_config_builder() {
        let config = JwtConfig::new("secret").expiration(30).issuer("my_game");

        assert_eq!(config.expiration_minutes, 30);
        assert_eq!(config.issuer, "my_game");
    }

    #[test]
    fn test_jwt_config_from_env_missing_secret() {
        let original = std::env::var("JWT_SECRET").ok();
        // SAFETY: test environment
        unsafe { std::env::remove_var("JWT_SECRET") };

        let result = JwtConfig::from_env();
        assert!(matches!(result, Err(JwtError::MissingSecret)));

        if let Some(val) = original {
            // SAFETY: test environment
            unsafe { std::env::set_var("JWT_SECRET", val) };
        }
    }

    // ========================================================================
    // JWT Service Tests
    // ========================================================================

    #[test]
    fn test_issue_token() {
        let service = create_test_service();

        let result = service.issue("player1", "Player One");

        assert!(result.is_ok());
        let (token, exp) = result.unwrap();
        assert!(!token.is_empty());
        assert!(exp > Utc::now().timestamp());
    }

    #[test]
    fn test_issue_then_verify_roundtrip() {
        let service = create_test_service();

        let (token, exp) = service.issue("player1", "Player One").unwrap();
        let claims = service.verify(&token).unwrap();

        assert_eq!(claims.sub, "player1");
        assert_eq!(claims.user_name, "Player One");
        assert_eq!(claims.exp, exp);
        assert_eq!(claims.iss, "dungeonhub");
    }

    #[test]
    fn test_expiry_is_one_hour_out() {
        let service = create_test_service();

        let before = Utc::now().timestamp();
        let (_, exp) = service.issue("player1", "Player One").unwrap();
        let after = Utc::now().timestamp();

        assert!(exp >= before + 3600);
        assert!(exp <= after + 3600);
    }

    #[test]
    fn test_verify_invalid_token() {
        let service = create_test_service();

        let result = service.verify("invalid.token.here");
        assert!(result.is_err());
    }

    #[test]
    fn test_verify_token_wrong_secret() {
        let service1 = JwtService::new(JwtConfig::new("secret_one"));
        let service2 = JwtService::new(JwtConfig::new("secret_two"));

        let (token, _) = service1.issue("player1", "Player One").unwrap();

        let result = service2.verify(&token);
        assert!(matches!(result, Err(JwtError::InvalidToken)));
    }

    #[test]
    fn test_verify_token_wrong_issuer() {
        let issuing = JwtService::new(JwtConfig::new("shared_secret").issuer("other_service"));
        let verifying = JwtService::new(JwtConfig::new("shared_secret"));

        let (token, _) = issuing.issue("player1", "Player One").unwrap();

        assert!(verifying.verify(&token).is_err());
    }

    #[test]
    fn test_token_contains_unique_jti() {
        let service = create_test_service();

        let (token1, _) = service.issue("player1", "Player One").unwrap();
        let (token2, _) = service.issue("player1", "Player One").unwrap();

        let claims1 = service.verify(&token1).unwrap();
        let claims2 = service.verify(&token2).unwrap();

        // Each token should have a unique JTI
        assert_ne!(claims1.jti, claims2.jti);
    }

    #[test]
    fn test_expired_token() {
        // Create a service with negative expiration to ensure token is already expired
        let config = JwtConfig::new("test_secret").expiration(-1);
        let service = JwtService::new(config);

        let (token, _) = service.issue("player1", "Player One").unwrap();

        // Token should be expired immediately since expiration is in the past
        let result = service.verify(&token);
        assert!(
            matches!(result, Err(JwtError::Expired)),
            "Expected Expired error, got: {:?}",
            result
        );
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn test_jwt_error_display() {
        assert_eq!(
            format!("{}", JwtError::MissingSecret),
            "JWT_SECRET environment variable not set"
        );
        assert_eq!(format!("{}", JwtError::Expired), "Token expired");
        assert_eq!(format!("{}", JwtError::InvalidToken), "Invalid token");
    }
}
