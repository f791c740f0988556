//! MySQL implementation of the AccountRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use apex_core::domain::entities::account::Account;
use apex_core::errors::{AuthError, DomainError};
use apex_core::repositories::AccountRepository;

use super::{db_error, is_duplicate_key};

const SELECT_COLUMNS: &str = r#"
    SELECT id, email, first_name, last_name, password_hash,
           is_verified, is_active, created_at, updated_at
    FROM accounts
"#;

/// MySQL implementation of AccountRepository
///
/// `accounts.email` carries a unique index; inserts that hit it surface as
/// `EmailAlreadyRegistered`.
pub struct MySqlAccountRepository {
    pool: MySqlPool,
}

impl MySqlAccountRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_account(row: &sqlx::mysql::MySqlRow) -> Result<Account, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;

        Ok(Account {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid account UUID: {}", e) })?,
            email: row
                .try_get("email")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get email: {}", e) })?,
            first_name: row
                .try_get("first_name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get first_name: {}", e) })?,
            last_name: row
                .try_get("last_name")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get last_name: {}", e) })?,
            password_hash: row
                .try_get("password_hash")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get password_hash: {}", e) })?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_verified: {}", e) })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_active: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            updated_at: row
                .try_get::<DateTime<Utc>, _>("updated_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get updated_at: {}", e) })?,
        })
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE email = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by email"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let query = format!("{} WHERE id = ? LIMIT 1", SELECT_COLUMNS);

        let row = sqlx::query(&query)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find account by id"))?;

        row.as_ref().map(Self::row_to_account).transpose()
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            INSERT INTO accounts (
                id, email, first_name, last_name, password_hash,
                is_verified, is_active, created_at, updated_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(account.id.to_string())
            .bind(&account.email)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.password_hash)
            .bind(account.is_verified)
            .bind(account.is_active)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::Auth(AuthError::EmailAlreadyRegistered)
                } else {
                    DomainError::Internal { message: format!("Failed to create account: {}", e) }
                }
            })?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts
            SET first_name = ?, last_name = ?, password_hash = ?,
                is_verified = ?, is_active = ?, updated_at = ?
            WHERE id = ?
        "#;

        let result = sqlx::query(query)
            .bind(&account.first_name)
            .bind(&account.last_name)
            .bind(&account.password_hash)
            .bind(account.is_verified)
            .bind(account.is_active)
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to update account"))?;

        if result.rows_affected() == 0 {
            // MySQL reports zero affected rows when nothing changed, so confirm the row exists
            if self.find_by_id(account.id).await?.is_none() {
                return Err(DomainError::NotFound {
                    resource: format!("Account with id {}", account.id),
                });
            }
        }

        Ok(account)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let row = sqlx::query("SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?) as `exists`")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map_err(db_error("Failed to check account existence"))?;

        let exists: i64 = row
            .try_get("exists")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get existence result: {}", e) })?;

        Ok(exists == 1)
    }
}
