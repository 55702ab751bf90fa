//! Character repository for database operations
//!
//! Characters belong to exactly one account; deletion is owner-scoped so a
//! single query enforces the ownership check.

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::Character;

/// Stats assigned to every freshly created character
const DEFAULT_HEALTH: i32 = 500;
const DEFAULT_POWER: i32 = 100;
const DEFAULT_MONEY: i32 = 10000;

/// Character repository error types
#[derive(Debug, thiserror::Error)]
pub enum CharacterRepositoryError {
    #[error("Character not found")]
    NotFound,

    #[error("Character name already exists")]
    NameAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Character repository for database operations
#[derive(Clone)]
pub struct CharacterRepository {
    pool: PgPool,
}

impl CharacterRepository {
    /// Create a new character repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a character with default stats, linked to `owner_id`
    pub async fn create(
        &self,
        name: &str,
        owner_id: Uuid,
    ) -> Result<Character, CharacterRepositoryError> {
        // Character names are globally unique
        if self.find_by_name(name).await?.is_some() {
            return Err(CharacterRepositoryError::NameAlreadyExists);
        }

        let character = sqlx::query_as::<_, Character>(
            r#"
            INSERT INTO characters (owner_id, name, health, power, money)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, health, power, money, created_at, updated_at
            "#,
        )
        .bind(owner_id)
        .bind(name)
        .bind(DEFAULT_HEALTH)
        .bind(DEFAULT_POWER)
        .bind(DEFAULT_MONEY)
        .fetch_one(&self.pool)
        .await?;

        Ok(character)
    }

    /// Find a character by ID
    pub async fn find_by_id(
        &self,
        id: Uuid,
    ) -> Result<Option<Character>, CharacterRepositoryError> {
        let character = sqlx::query_as::<_, Character>(
            r#"
            SELECT id, owner_id, name, health, power, money, created_at, updated_at
            FROM characters
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(character)
    }

    /// Find a character by name
    pub async fn find_by_name(
        &self,
        name: &str,
    ) -> Result<Option<Character>, CharacterRepositoryError> {
        let character = sqlx::query_as::<_, Character>(
            r#"
            SELECT id, owner_id, name, health, power, money, created_at, updated_at
            FROM characters
            WHERE name = $1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(character)
    }

    /// Delete a character, but only if `owner_id` owns it.
    ///
    /// Returns false when the character does not exist or belongs to a
    /// different account; callers cannot distinguish the two cases.
    pub async fn delete_owned(
        &self,
        id: Uuid,
        owner_id: Uuid,
    ) -> Result<bool, CharacterRepositoryError> {
        let result = sqlx::query(
            r#"
            DELETE FROM characters
            WHERE id = $1 AND owner_id = $2
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
