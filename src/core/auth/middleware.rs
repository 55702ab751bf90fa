//! Authentication gate for protected routes
//!
//! Reads the `Authorization: Bearer <token>` header, verifies the token,
//! resolves the account (without its password hash), and attaches the
//! identity to request extensions. Any failure short-circuits with an error
//! response before the downstream handler runs.

use axum::{
    Json,
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::core::auth::jwt::{JwtError, JwtService};
use crate::core::db::models::AccountIdentity;
use crate::core::db::repositories::{AccountRepository, AccountRepositoryError};

/// State for the authentication gate
#[derive(Clone)]
pub struct AuthGateState {
    pub account_repo: AccountRepository,
    pub jwt_service: JwtService,
}

/// API error response
#[derive(Debug, Serialize)]
struct ApiError {
    error: String,
    code: String,
}

/// Authentication gate error types
#[derive(Debug, thiserror::Error)]
pub enum AuthGateError {
    #[error("Malformed authorization header")]
    MalformedHeader,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token expired")]
    TokenExpired,

    #[error("Account not found")]
    AccountNotFound,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<JwtError> for AuthGateError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthGateError::TokenExpired,
            JwtError::InvalidToken | JwtError::DecodingError(_) => AuthGateError::InvalidToken,
            _ => AuthGateError::InternalError(err.to_string()),
        }
    }
}

impl From<AccountRepositoryError> for AuthGateError {
    fn from(err: AccountRepositoryError) -> Self {
        match err {
            AccountRepositoryError::NotFound => AuthGateError::AccountNotFound,
            _ => AuthGateError::InternalError(err.to_string()),
        }
    }
}

impl IntoResponse for AuthGateError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AuthGateError::MalformedHeader => (StatusCode::BAD_REQUEST, "MALFORMED_HEADER"),
            AuthGateError::InvalidToken => (StatusCode::UNAUTHORIZED, "INVALID_TOKEN"),
            AuthGateError::TokenExpired => (StatusCode::UNAUTHORIZED, "TOKEN_EXPIRED"),
            AuthGateError::AccountNotFound => (StatusCode::UNAUTHORIZED, "ACCOUNT_NOT_FOUND"),
            AuthGateError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiError {
            error: self.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

/// Parse an `Authorization` header value into its bearer token.
///
/// Requires the literal `Bearer` scheme followed by exactly one token value.
fn parse_bearer(value: &str) -> Result<&str, AuthGateError> {
    let parts: Vec<&str> = value.split(' ').collect();

    if parts.len() != 2 {
        return Err(AuthGateError::MalformedHeader);
    }

    if parts[0] != "Bearer" {
        return Err(AuthGateError::MalformedHeader);
    }

    if parts[1].is_empty() {
        return Err(AuthGateError::MalformedHeader);
    }

    Ok(parts[1])
}

/// Middleware that authenticates a request before the handler runs.
///
/// On success the resolved [`AccountIdentity`] is available to handlers via
/// `Extension<AccountIdentity>`.
pub async fn require_auth(
    State(state): State<AuthGateState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AuthGateError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or(AuthGateError::MalformedHeader)?;

    let token = parse_bearer(header_value)?;
    let claims = state.jwt_service.verify(token)?;

    let identity = state
        .account_repo
        .find_identity_by_account_id(&claims.sub)
        .await?
        .ok_or(AuthGateError::AccountNotFound)?;

    request.extensions_mut().insert(identity);

    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Bearer Parsing Tests
    // ========================================================================

    #[test]
    fn test_parse_bearer_valid() {
        let token = parse_bearer("Bearer my_token_123").unwrap();
        assert_eq!(token, "my_token_123");
    }

    #[test]
    fn test_parse_bearer_single_part() {
        let result = parse_bearer("my_token_123");
        assert!(matches!(result, Err(AuthGateError::MalformedHeader)));
    }

    #[test]
    fn test_parse_bearer_too_many_parts() {
        let result = parse_bearer("Bearer my_token extra");
        assert!(matches!(result, Err(AuthGateError::MalformedHeader)));
    }

    #[test]
    fn test_parse_bearer_wrong_scheme() {
        let result = parse_bearer("Basic base64credentials");
        assert!(matches!(result, Err(AuthGateError::MalformedHeader)));

        // Scheme comparison is case sensitive
        let result = parse_bearer("bearer my_token_123");
        assert!(matches!(result, Err(AuthGateError::MalformedHeader)));
    }

    #[test]
    fn test_parse_bearer_empty() {
        let result = parse_bearer("");
        assert!(matches!(result, Err(AuthGateError::MalformedHeader)));

        let result = parse_bearer("Bearer ");
        assert!(matches!(result, Err(AuthGateError::MalformedHeader)));
    }

    // ========================================================================
    // Status Mapping Tests
    // ========================================================================

    #[test]
    fn test_malformed_header_maps_to_400() {
        assert_eq!(
            AuthGateError::MalformedHeader.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_token_failures_map_to_401() {
        assert_eq!(
            AuthGateError::InvalidToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthGateError::TokenExpired.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AuthGateError::AccountNotFound.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_internal_error_maps_to_500() {
        assert_eq!(
            AuthGateError::InternalError("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    // ========================================================================
    // Error Conversion Tests
    // ========================================================================

    #[test]
    fn test_jwt_error_conversion() {
        let err: AuthGateError = JwtError::Expired.into();
        assert!(matches!(err, AuthGateError::TokenExpired));

        let err: AuthGateError = JwtError::InvalidToken.into();
        assert!(matches!(err, AuthGateError::InvalidToken));

        let err: AuthGateError = JwtError::MissingSecret.into();
        assert!(matches!(err, AuthGateError::InternalError(_)));
    }

    #[test]
    fn test_repository_error_conversion() {
        let err: AuthGateError = AccountRepositoryError::NotFound.into();
        assert!(matches!(err, AuthGateError::AccountNotFound));

        let err: AuthGateError = AccountRepositoryError::HashingError("boom".to_string()).into();
        assert!(matches!(err, AuthGateError::InternalError(_)));
    }
}
