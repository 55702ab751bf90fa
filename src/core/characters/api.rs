//! Character API endpoints
//!
//! Provides REST API endpoints for character management (auth required):
//! - POST /character/createfromuser - Create a character for the caller
//! - DELETE /character/delete - Delete one of the caller's characters
//! - GET /character/detail - Inspect a character
//!
//! The detail view exposes `money` only to the character's owner.

use axum::{
    Extension, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::core::auth::middleware::{AuthGateState, require_auth};
use crate::core::db::models::{AccountIdentity, CharacterDetailResponse, CharacterResponse};
use crate::core::db::repositories::{CharacterRepository, CharacterRepositoryError};

/// Character API state containing the character repository
#[derive(Clone)]
pub struct CharacterApiState {
    pub character_repo: CharacterRepository,
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

/// Character API error types
#[derive(Debug, thiserror::Error)]
pub enum CharacterApiError {
    #[error("Character name already taken")]
    DuplicateName,

    #[error("Character not found or not owned by this account")]
    NotFoundOrForbidden,

    #[error("Character not found")]
    NotFound,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<CharacterRepositoryError> for CharacterApiError {
    fn from(err: CharacterRepositoryError) -> Self {
        match err {
            CharacterRepositoryError::NameAlreadyExists => CharacterApiError::DuplicateName,
            CharacterRepositoryError::NotFound => CharacterApiError::NotFound,
            CharacterRepositoryError::DatabaseError(e) => {
                CharacterApiError::InternalError(e.to_string())
            }
        }
    }
}

impl IntoResponse for CharacterApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            CharacterApiError::DuplicateName => (StatusCode::BAD_REQUEST, "DUPLICATE_CHARACTER"),
            CharacterApiError::NotFoundOrForbidden => {
                (StatusCode::FORBIDDEN, "NOT_FOUND_OR_FORBIDDEN")
            }
            CharacterApiError::NotFound => (StatusCode::NOT_FOUND, "CHARACTER_NOT_FOUND"),
            CharacterApiError::InternalError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = ApiError::new(self.to_string(), code);

        (status, Json(body)).into_response()
    }
}

// ============================================================================
// Request/Response DTOs
// ============================================================================

/// Request for creating a new character
#[derive(Debug, Deserialize)]
pub struct CreateCharacterRequest {
    pub name: String,
}

/// Request for deleting a character
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteCharacterRequest {
    pub character_id: Uuid,
}

/// Query parameters for the detail view
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailQuery {
    pub character_id: Uuid,
}

/// Response for successful character creation
#[derive(Debug, Serialize)]
pub struct CreateCharacterResponse {
    pub message: String,
    pub character_info: CharacterResponse,
}

/// Response for successful character deletion
#[derive(Debug, Serialize)]
pub struct DeleteCharacterResponse {
    pub message: String,
}

/// Create the character API router; every route requires authentication
pub fn character_api_router(state: CharacterApiState, gate: AuthGateState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/character/createfromuser", post(create_character_handler))
        .route("/character/delete", delete(delete_character_handler))
        .route("/character/detail", get(character_detail_handler))
        .route_layer(middleware::from_fn_with_state(gate, require_auth))
        .with_state(state)
}

/// POST /character/createfromuser
/// Create a character with default stats, owned by the caller
async fn create_character_handler(
    State(state): State<Arc<CharacterApiState>>,
    Extension(account): Extension<AccountIdentity>,
    Json(request): Json<CreateCharacterRequest>,
) -> Result<Json<CreateCharacterResponse>, CharacterApiError> {
    tracing::info!(
        "Character creation attempt: {} by {}",
        request.name,
        account.account_id
    );

    let character = state
        .character_repo
        .create(&request.name, account.id)
        .await?;

    Ok(Json(CreateCharacterResponse {
        message: "Character created.".to_string(),
        character_info: character.into(),
    }))
}

/// DELETE /character/delete
/// Delete a character; only the owner may do this
async fn delete_character_handler(
    State(state): State<Arc<CharacterApiState>>,
    Extension(account): Extension<AccountIdentity>,
    Json(request): Json<DeleteCharacterRequest>,
) -> Result<Json<DeleteCharacterResponse>, CharacterApiError> {
    let deleted = state
        .character_repo
        .delete_owned(request.character_id, account.id)
        .await?;

    if !deleted {
        return Err(CharacterApiError::NotFoundOrForbidden);
    }

    tracing::info!(
        "Character {} deleted by {}",
        request.character_id,
        account.account_id
    );

    Ok(Json(DeleteCharacterResponse {
        message: "Character deleted.".to_string(),
    }))
}

/// GET /character/detail
/// Inspect a character; `money` is included only for the owner
async fn character_detail_handler(
    State(state): State<Arc<CharacterApiState>>,
    Extension(account): Extension<AccountIdentity>,
    Query(query): Query<DetailQuery>,
) -> Result<Json<CharacterDetailResponse>, CharacterApiError> {
    let character = state
        .character_repo
        .find_by_id(query.character_id)
        .await?
        .ok_or(CharacterApiError::NotFound)?;

    Ok(Json(CharacterDetailResponse::for_viewer(
        &character, account.id,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Status Mapping Tests
    // ========================================================================

    #[test]
    fn test_duplicate_name_maps_to_400() {
        assert_eq!(
            CharacterApiError::DuplicateName.into_response().status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_not_found_or_forbidden_maps_to_403() {
        assert_eq!(
            CharacterApiError::NotFoundOrForbidden
                .into_response()
                .status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_not_found_maps_to_404() {
        assert_eq!(
            CharacterApiError::NotFound.into_response().status(),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn test_internal_error_maps_to_500() {
        assert_eq!(
            CharacterApiError::InternalError("boom".to_string())
                .into_response()
                .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    // ========================================================================
    // Error Conversion Tests
    // ========================================================================

    #[test]
    fn test_repository_error_conversion() {
        let err: CharacterApiError = CharacterRepositoryError::NameAlreadyExists.into();
        assert!(matches!(err, CharacterApiError::DuplicateName));

        let err: CharacterApiError = CharacterRepositoryError::NotFound.into();
        assert!(matches!(err, CharacterApiError::NotFound));
    }

    // ========================================================================
    // Request/Response DTO Tests
    // ========================================================================

    #[test]
    fn test_create_request_deserialization() {
        let json = r#"{"name": "Hero"}"#;

        let request: CreateCharacterRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.name, "Hero");
    }

    #[test]
    fn test_delete_request_uses_camel_case_key() {
        let id = Uuid::new_v4();
        let json = format!(r#"{{"characterId": "{}"}}"#, id);

        let request: DeleteCharacterRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.character_id, id);
    }

    #[test]
    fn test_delete_request_rejects_snake_case_key() {
        let json = format!(r#"{{"character_id": "{}"}}"#, Uuid::new_v4());

        let result: Result<DeleteCharacterRequest, _> = serde_json::from_str(&json);
        assert!(result.is_err());
    }

    #[test]
    fn test_create_response_serialization() {
        let response = CreateCharacterResponse {
            message: "Character created.".to_string(),
            character_info: CharacterResponse {
                character_id: Uuid::new_v4(),
                name: "Hero".to_string(),
                health: 500,
                power: 100,
                money: 10000,
            },
        };
        let json = serde_json::to_string(&response).unwrap();

        assert!(json.contains(r#""message":"Character created.""#));
        assert!(json.contains(r#""character_info""#));
        assert!(json.contains(r#""health":500"#));
    }
}
