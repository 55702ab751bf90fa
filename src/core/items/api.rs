//! Item API endpoints
//!
//! Provides REST API endpoints for the shared item catalog (no auth):
//! - POST /item/create/{itemId} - Create a new item
//! - GET /item/list - List all items
//! - GET /item/{itemCode} - Get an item by its code
//! - PUT /item/update/{itemCode} - Partially update an item
//!
//! The create route keeps the legacy path parameter even though the item
//! code is read from the body.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::core::db::models::{ItemResponse, UpdateItem};
use crate::core::db::repositories::{ItemRepository, ItemRepositoryError};

/// Item API state containing the item repository
#[derive(Clone)]
pub struct ItemApiState {
    pub item_repo: ItemRepository,
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

/// Item API error types
#[derive(Debug, thiserror::Error)]
pub enum ItemApiError {
    #[error("Item creation failed: {0}")]
    CreateFailed(String),

    #[error("Item not found")]
    NotFound,

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ItemRepositoryError> for ItemApiError {
    fn from(err: ItemRepositoryError) -> Self {
        match err {
            ItemRepositoryError::NotFound => ItemApiError::NotFound,
            ItemRepositoryError::DatabaseError(e) => ItemApiError::InternalError(e.to_string()),
        }
    }
}

impl IntoResponse for ItemApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ItemApiError::CreateFailed(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "ITEM_CREATE_FAILED")
            }
            ItemApiError::NotFound => (StatusCode::NOT_FOUND, "ITEM_NOT_FOUND"),
            ItemApiError::InternalError(_) => {
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

/// Request for creating a new item.
///
/// The lowercase keys are the catalog's established wire format.
#[derive(Debug, Deserialize)]
pub struct CreateItemRequest {
    pub itemcode: i32,
    pub itemname: String,
    pub atk: i32,
    pub price: i32,
}

/// Request for partially updating an item
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub item_name: Option<String>,
    pub atk: Option<i32>,
    pub price: Option<i32>,
}

impl From<UpdateItemRequest> for UpdateItem {
    fn from(request: UpdateItemRequest) -> Self {
        Self {
            item_name: request.item_name,
            atk: request.atk,
            price: request.price,
        }
    }
}

/// Response carrying a single item
#[derive(Debug, Serialize)]
pub struct ItemInfoResponse {
    pub item_info: ItemResponse,
}

/// Response carrying the full catalog
#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub item_info: Vec<ItemResponse>,
}

/// Response for a successful update
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemResponse {
    pub message: String,
    pub update_item: ItemResponse,
}

/// Create the item API router
pub fn item_api_router(state: ItemApiState) -> Router {
    let state = Arc::new(state);

    Router::new()
        .route("/item/create/{itemId}", post(create_item_handler))
        .route("/item/list", get(list_items_handler))
        .route("/item/{itemCode}", get(get_item_handler))
        .route("/item/update/{itemCode}", put(update_item_handler))
        .with_state(state)
}

/// POST /item/create/{itemId}
/// Create a new item from the request body
async fn create_item_handler(
    State(state): State<Arc<ItemApiState>>,
    Json(request): Json<CreateItemRequest>,
) -> Result<Json<ItemInfoResponse>, ItemApiError> {
    let item = state
        .item_repo
        .create(request.itemcode, &request.itemname, request.atk, request.price)
        .await
        .map_err(|e| {
            tracing::error!("Item creation failed: {}", e);
            ItemApiError::CreateFailed(e.to_string())
        })?;

    tracing::info!("Item {} created: {}", item.item_code, item.item_name);

    Ok(Json(ItemInfoResponse {
        item_info: item.into(),
    }))
}

/// GET /item/list
/// List every item in the catalog
async fn list_items_handler(
    State(state): State<Arc<ItemApiState>>,
) -> Result<Json<ItemListResponse>, ItemApiError> {
    let items = state.item_repo.list().await?;

    Ok(Json(ItemListResponse {
        item_info: items.into_iter().map(Into::into).collect(),
    }))
}

/// GET /item/{itemCode}
/// Get an item by its numeric code
async fn get_item_handler(
    State(state): State<Arc<ItemApiState>>,
    Path(item_code): Path<i32>,
) -> Result<Json<ItemInfoResponse>, ItemApiError> {
    let item = state
        .item_repo
        .find_by_code(item_code)
        .await?
        .ok_or(ItemApiError::NotFound)?;

    Ok(Json(ItemInfoResponse {
        item_info: item.into(),
    }))
}

/// PUT /item/update/{itemCode}
/// Partially update an item's name, attack, or price
async fn update_item_handler(
    State(state): State<Arc<ItemApiState>>,
    Path(item_code): Path<i32>,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<UpdateItemResponse>, ItemApiError> {
    let item = state.item_repo.update(item_code, &request.into()).await?;

    tracing::info!("Item {} updated", item.item_code);

    Ok(Json(UpdateItemResponse {
        message: "Item updated.".to_string(),
        update_item: item.into(),
    }))
}
