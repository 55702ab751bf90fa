//! Item repository for database operations
//!
//! The item catalog is shared between all accounts and keyed by a numeric
//! code supplied by the client; uniqueness of the code is enforced by the
//! primary key constraint.

use sqlx::PgPool;

use crate::core::db::models::{Item, UpdateItem};

/// Item repository error types
#[derive(Debug, thiserror::Error)]
pub enum ItemRepositoryError {
    #[error("Item not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Item repository for database operations
#[derive(Clone)]
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// Create a new item repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a new item.
    ///
    /// A duplicate code surfaces as a database error from the primary key
    /// constraint; the catalog does no pre-check.
    pub async fn create(
        &self,
        item_code: i32,
        item_name: &str,
        atk: i32,
        price: i32,
    ) -> Result<Item, ItemRepositoryError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (item_code, item_name, atk, price)
            VALUES ($1, $2, $3, $4)
            RETURNING item_code, item_name, atk, price, created_at, updated_at
            "#,
        )
        .bind(item_code)
        .bind(item_name)
        .bind(atk)
        .bind(price)
        .fetch_one(&self.pool)
        .await?;

        Ok(item)
    }

    /// List all items, ordered by code
    pub async fn list(&self) -> Result<Vec<Item>, ItemRepositoryError> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT item_code, item_name, atk, price, created_at, updated_at
            FROM items
            ORDER BY item_code
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(items)
    }

    /// Find an item by its code
    pub async fn find_by_code(&self, item_code: i32) -> Result<Option<Item>, ItemRepositoryError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            SELECT item_code, item_name, atk, price, created_at, updated_at
            FROM items
            WHERE item_code = $1
            "#,
        )
        .bind(item_code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(item)
    }

    /// Partially update an item; absent fields keep their current value
    pub async fn update(
        &self,
        item_code: i32,
        updates: &UpdateItem,
    ) -> Result<Item, ItemRepositoryError> {
        let item = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET
                item_name = COALESCE($2, item_name),
                atk = COALESCE($3, atk),
                price = COALESCE($4, price),
                updated_at = now()
            WHERE item_code = $1
            RETURNING item_code, item_name, atk, price, created_at, updated_at
            "#,
        )
        .bind(item_code)
        .bind(&updates.item_name)
        .bind(updates.atk)
        .bind(updates.price)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(ItemRepositoryError::NotFound)?;

        Ok(item)
    }
}
