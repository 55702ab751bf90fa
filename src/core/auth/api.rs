//! Account API endpoints
//!
//! Provides REST API endpoints for account management:
//! - POST /account/join - Register a new account
//! - POST /account/login - Login and get an access token

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::auth::{AuthError, AuthService, JoinRequest, LoginRequest};
use crate::core::db::models::AccountResponse;

/// Account API state containing the auth service
#[derive(Clone)]
pub struct AccountApiState {
    pub auth_service: AuthService,
}

/// API error response
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
}

impl ApiError {
    pub fn new(error: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
        }
    }
}

/// Convert AuthError to API response
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthError::InvalidAccountId => (StatusCode::BAD_REQUEST, "INVALID_ACCOUNT_ID"),
            AuthError::PasswordTooShort => (StatusCode::BAD_REQUEST, "PASSWORD_TOO_SHORT"),
            AuthError::PasswordMismatch => (StatusCode::BAD_REQUEST, "PASSWORD_MISMATCH"),
            AuthError::MissingUserName => (StatusCode::BAD_REQUEST, "MISSING_USER_NAME"),
            AuthError::DuplicateAccount => (StatusCode::BAD_REQUEST, "DUPLICATE_ACCOUNT"),
            AuthError::AccountNotFound => (StatusCode::BAD_REQUEST, "ACCOUNT_NOT_FOUND"),
            AuthError::InvalidCredentials => (StatusCode::BAD_REQUEST, "INVALID_CREDENTIALS"),
            AuthError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

/// Response for successful registration
#[derive(Debug, Serialize)]
pub struct JoinResponse {
    pub message: String,
    pub account_info: AccountResponse,
}

/// Token payload returned on login
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenInfo {
    pub access_token: String,
}

/// Response for successful login
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub account_info: TokenInfo,
}

/// Create the account API router
pub fn account_api_router(state: AccountApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/account/join", post(join_handler))
        .route("/account/login", post(login_handler))
        .with_state(state)
}

/// POST /account/join
/// Register a new account
async fn join_handler(
    State(state): State<Arc<AccountApiState>>,
    Json(request): Json<JoinRequest>,
) -> Result<Json<JoinResponse>, AuthError> {
    tracing::info!("Registration attempt for account: {}", request.account_id);

    let account_info = state.auth_service.join(request).await?;

    tracing::info!("Account registered successfully: {}", account_info.account_id);

    Ok(Json(JoinResponse {
        message: "Account registered successfully.".to_string(),
        account_info,
    }))
}

/// POST /account/login
/// Login and get an access token
async fn login_handler(
    State(state): State<Arc<AccountApiState>>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    tracing::info!("Login attempt for account: {}", request.account_id);

    let access_token = state.auth_service.login(request).await?;

    Ok(Json(LoginResponse {
        account_info: TokenInfo { access_token },
    }))
}
