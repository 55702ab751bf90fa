//! Database models for the game backend
//!
//! Entity structs map to PostgreSQL tables; the response structs are the
//! wire-format views returned by the API (camelCase keys, secrets omitted).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// ============================================================================
// Account Model
// ============================================================================

/// Account entity representing a registered player account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Account {
    pub id: Uuid,
    /// Login identifier chosen at registration (lowercase alphanumeric)
    pub account_id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Account view for API responses (never carries the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountResponse {
    pub account_id: String,
    pub user_name: String,
}

impl From<Account> for AccountResponse {
    fn from(account: Account) -> Self {
        Self {
            account_id: account.account_id,
            user_name: account.user_name,
        }
    }
}

/// Resolved identity of an authenticated caller.
///
/// Selected without the password hash; the authentication gate attaches this
/// to request extensions for downstream handlers.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AccountIdentity {
    pub id: Uuid,
    pub account_id: String,
    pub user_name: String,
}

// ============================================================================
// Character Model
// ============================================================================

/// Character entity owned by an account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Character {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub name: String,
    pub health: i32,
    pub power: i32,
    pub money: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Character view for creation responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterResponse {
    pub character_id: Uuid,
    pub name: String,
    pub health: i32,
    pub power: i32,
    pub money: i32,
}

impl From<Character> for CharacterResponse {
    fn from(character: Character) -> Self {
        Self {
            character_id: character.id,
            name: character.name,
            health: character.health,
            power: character.power,
            money: character.money,
        }
    }
}

/// Character detail view.
///
/// `money` is serialized only when the requesting account owns the character.
#[derive(Debug, Clone, Serialize)]
pub struct CharacterDetailResponse {
    pub name: String,
    pub health: i32,
    pub power: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub money: Option<i32>,
}

impl CharacterDetailResponse {
    /// Build the detail view for `viewer_id`, exposing `money` only to the
    /// owner.
    pub fn for_viewer(character: &Character, viewer_id: Uuid) -> Self {
        let money = if character.owner_id == viewer_id {
            Some(character.money)
        } else {
            None
        };

        Self {
            name: character.name.clone(),
            health: character.health,
            power: character.power,
            money,
        }
    }
}

// ============================================================================
// Item Model
// ============================================================================

/// Item entity in the shared catalog, keyed by its numeric code
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub item_code: i32,
    pub item_name: String,
    pub atk: i32,
    pub price: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Item view for API responses
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub item_code: i32,
    pub item_name: String,
    pub atk: i32,
    pub price: i32,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self {
            item_code: item.item_code,
            item_name: item.item_name,
            atk: item.atk,
            price: item.price,
        }
    }
}

/// Item data for partial updates (None = leave the column unchanged)
#[derive(Debug, Clone, Default)]
pub struct UpdateItem {
    pub item_name: Option<String>,
    pub atk: Option<i32>,
    pub price: Option<i32>,
}
