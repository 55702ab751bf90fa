//! Authentication service
//!
//! Provides business logic for account registration and login. Coordinates
//! between the account repository and the JWT service. Input validation runs
//! before any storage call.

use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::db::models::AccountResponse;
use crate::core::db::repositories::{AccountRepository, AccountRepositoryError};

/// Minimum password length accepted at registration and login
const MIN_PASSWORD_LENGTH: usize = 6;

/// Authentication service error types
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Account identifier must be lowercase letters and digits only")]
    InvalidAccountId,

    #[error("Password too short (minimum 6 characters)")]
    PasswordTooShort,

    #[error("Password confirmation does not match")]
    PasswordMismatch,

    #[error("Display name is required")]
    MissingUserName,

    #[error("Account identifier already taken")]
    DuplicateAccount,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Password does not match")]
    InvalidCredentials,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<AccountRepositoryError> for AuthError {
    fn from(err: AccountRepositoryError) -> Self {
        match err {
            AccountRepositoryError::NotFound => AuthError::AccountNotFound,
            AccountRepositoryError::AlreadyExists => AuthError::DuplicateAccount,
            _ => AuthError::InternalError(err.to_string()),
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        AuthError::InternalError(err.to_string())
    }
}

/// Registration request data
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRequest {
    pub account_id: String,
    pub password: String,
    pub confirm_password: String,
    pub user_name: String,
}

/// Login request data
#[derive(Debug, Clone, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub account_id: String,
    pub password: String,
}

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    account_repo: AccountRepository,
    jwt_service: JwtService,
}

impl AuthService {
    /// Create a new authentication service
    pub fn new(account_repo: AccountRepository, jwt_service: JwtService) -> Self {
        Self {
            account_repo,
            jwt_service,
        }
    }

    /// Validate the login identifier format (lowercase alphanumeric)
    fn validate_account_id(account_id: &str) -> Result<(), AuthError> {
        if account_id.is_empty() {
            return Err(AuthError::InvalidAccountId);
        }

        if !account_id
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
        {
            return Err(AuthError::InvalidAccountId);
        }

        Ok(())
    }

    /// Validate the password length
    fn validate_password(password: &str) -> Result<(), AuthError> {
        if password.len() < MIN_PASSWORD_LENGTH {
            return Err(AuthError::PasswordTooShort);
        }

        Ok(())
    }

    /// Validate a full registration request
    fn validate_join(request: &JoinRequest) -> Result<(), AuthError> {
        Self::validate_account_id(&request.account_id)?;
        Self::validate_password(&request.password)?;

        if request.confirm_password != request.password {
            return Err(AuthError::PasswordMismatch);
        }

        if request.user_name.is_empty() {
            return Err(AuthError::MissingUserName);
        }

        Ok(())
    }

    /// Register a new account
    pub async fn join(&self, request: JoinRequest) -> Result<AccountResponse, AuthError> {
        // Validate input before touching storage
        Self::validate_join(&request)?;

        // Create the account (password is hashed in the repository)
        let account = self
            .account_repo
            .create(&request.account_id, &request.password, &request.user_name)
            .await?;

        Ok(account.into())
    }

    /// Login an existing account and issue an access token
    pub async fn login(&self, request: LoginRequest) -> Result<String, AuthError> {
        Self::validate_account_id(&request.account_id)?;
        Self::validate_password(&request.password)?;

        let account = self
            .account_repo
            .find_by_account_id(&request.account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;

        let is_valid = AccountRepository::verify_password(&request.password, &account.password_hash)
            .map_err(|e| AuthError::InternalError(e.to_string()))?;

        if !is_valid {
            return Err(AuthError::InvalidCredentials);
        }

        let (token, _) = self
            .jwt_service
            .issue(&account.account_id, &account.user_name)?;

        Ok(token)
    }
}
