//! MySQL implementation of the TokenRepository trait.
//!
//! Refresh tokens are stored by SHA-256 hash only; hashing happens in
//! `TokenService` before any value reaches this repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use apex_core::domain::entities::token::RefreshToken;
use apex_core::errors::DomainError;
use apex_core::repositories::TokenRepository;

use super::db_error;

/// MySQL implementation of TokenRepository
pub struct MySqlTokenRepository {
    /// Database connection pool
    pool: MySqlPool,
}

impl MySqlTokenRepository {
    /// Create a new MySQL token repository
    ///
    /// # Arguments
    /// * `pool` - MySQL connection pool from SQLx
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to RefreshToken entity
    fn row_to_token(row: &sqlx::mysql::MySqlRow) -> Result<RefreshToken, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get account_id: {}", e) })?;

        Ok(RefreshToken {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid token UUID: {}", e) })?,
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid account UUID: {}", e) })?,
            token_hash: row
                .try_get("token_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get token_hash: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            expires_at: row
                .try_get::<DateTime<Utc>, _>("expires_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get expires_at: {}", e) })?,
            is_revoked: row
                .try_get("is_revoked")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_revoked: {}", e) })?,
        })
    }
}

#[async_trait]
impl TokenRepository for MySqlTokenRepository {
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError> {
        // Check for duplicate token hash first
        let exists_row = sqlx::query(
            "SELECT EXISTS(SELECT 1 FROM refresh_tokens WHERE token_hash = ?) as `exists`",
        )
        .bind(&token.token_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to check token existence"))?;

        let exists: i64 = exists_row
            .try_get("exists")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get existence result: {}", e) })?;

        if exists == 1 {
            return Err(DomainError::Validation { message: "Token already exists".to_string() });
        }

        let query = r#"
            INSERT INTO refresh_tokens (
                id, account_id, token_hash, created_at, expires_at, is_revoked
            ) VALUES (?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(token.id.to_string())
            .bind(token.account_id.to_string())
            .bind(&token.token_hash)
            .bind(token.created_at)
            .bind(token.expires_at)
            .bind(token.is_revoked)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to save refresh token"))?;

        Ok(token)
    }

    async fn find_refresh_token(&self, token_hash: &str) -> Result<Option<RefreshToken>, DomainError> {
        let query = r#"
            SELECT id, account_id, token_hash, created_at, expires_at, is_revoked
            FROM refresh_tokens
            WHERE token_hash = ?
            LIMIT 1
        "#;

        let result = sqlx::query(query)
            .bind(token_hash)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find refresh token"))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_token(&row)?)),
            None => Ok(None),
        }
    }

    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("UPDATE refresh_tokens SET is_revoked = TRUE WHERE token_hash = ?")
            .bind(token_hash)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to revoke token"))?;

        Ok(result.rows_affected() > 0)
    }
}
