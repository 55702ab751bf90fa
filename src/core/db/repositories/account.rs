//! Account repository for database operations
//!
//! Provides account lookup and creation with secure password hashing using
//! bcrypt.

use sqlx::PgPool;
use uuid::Uuid;

use crate::core::db::models::{Account, AccountIdentity};

/// Cost factor for bcrypt hashing (12 is recommended for production)
const BCRYPT_COST: u32 = 12;

/// Account repository error types
#[derive(Debug, thiserror::Error)]
pub enum AccountRepositoryError {
    #[error("Account not found")]
    NotFound,

    #[error("Account identifier already exists")]
    AlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingError(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),
}

/// Account repository for database operations
#[derive(Clone)]
pub struct AccountRepository {
    pool: PgPool,
}

impl AccountRepository {
    /// Create a new account repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Hash a password using bcrypt with automatic salt generation
    pub fn hash_password(password: &str) -> Result<String, AccountRepositoryError> {
        bcrypt::hash(password, BCRYPT_COST)
            .map_err(|e| AccountRepositoryError::HashingError(e.to_string()))
    }

    /// Verify a password against a bcrypt hash
    pub fn verify_password(password: &str, hash: &str) -> Result<bool, AccountRepositoryError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AccountRepositoryError::HashingError(e.to_string()))
    }

    /// Create a new account with a plain text password (will be hashed)
    pub async fn create(
        &self,
        account_id: &str,
        password: &str,
        user_name: &str,
    ) -> Result<Account, AccountRepositoryError> {
        // Check if the login identifier is already taken
        if self.find_by_account_id(account_id).await?.is_some() {
            return Err(AccountRepositoryError::AlreadyExists);
        }

        // Hash the password with bcrypt (includes automatic salt)
        let password_hash = Self::hash_password(password)?;

        let account = sqlx::query_as::<_, Account>(
            r#"
            INSERT INTO accounts (account_id, password_hash, user_name)
            VALUES ($1, $2, $3)
            RETURNING id, account_id, password_hash, user_name, created_at, updated_at
            "#,
        )
        .bind(account_id)
        .bind(&password_hash)
        .bind(user_name)
        .fetch_one(&self.pool)
        .await?;

        Ok(account)
    }

    /// Find an account by its login identifier
    pub async fn find_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<Account>, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_id, password_hash, user_name, created_at, updated_at
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Find an account by its primary key
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, AccountRepositoryError> {
        let account = sqlx::query_as::<_, Account>(
            r#"
            SELECT id, account_id, password_hash, user_name, created_at, updated_at
            FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Resolve an account's identity by its login identifier, omitting the
    /// password hash.
    pub async fn find_identity_by_account_id(
        &self,
        account_id: &str,
    ) -> Result<Option<AccountIdentity>, AccountRepositoryError> {
        let identity = sqlx::query_as::<_, AccountIdentity>(
            r#"
            SELECT id, account_id, user_name
            FROM accounts
            WHERE account_id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(identity)
    }
}
