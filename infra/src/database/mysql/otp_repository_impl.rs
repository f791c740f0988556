//! MySQL implementation of the OtpRepository trait.
//!
//! Each purpose has its own table of identical shape: `account_otps` for
//! account verification and `password_reset_otps` for password resets. The
//! `seq` auto-increment column breaks ties between records created in the
//! same instant.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySql, MySqlPool, Row, Transaction};
use uuid::Uuid;

use apex_core::domain::entities::otp_record::{OtpPurpose, OtpRecord};
use apex_core::errors::DomainError;
use apex_core::repositories::OtpRepository;

use super::db_error;

/// Table holding records for a purpose
fn table_for(purpose: OtpPurpose) -> &'static str {
    match purpose {
        OtpPurpose::AccountVerification => "account_otps",
        OtpPurpose::PasswordReset => "password_reset_otps",
    }
}

/// MySQL implementation of OtpRepository
pub struct MySqlOtpRepository {
    pool: MySqlPool,
}

impl MySqlOtpRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_record(row: &sqlx::mysql::MySqlRow, purpose: OtpPurpose) -> Result<OtpRecord, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get account_id: {}", e) })?;

        Ok(OtpRecord {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid OTP record UUID: {}", e) })?,
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid account UUID: {}", e) })?,
            purpose,
            secret: row
                .try_get("secret")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get secret: {}", e) })?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get created_at: {}", e) })?,
            is_verified: row
                .try_get("is_verified")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_verified: {}", e) })?,
        })
    }

    async fn begin(&self) -> Result<Transaction<'_, MySql>, DomainError> {
        self.pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))
    }
}

fn insert_sql(purpose: OtpPurpose) -> String {
    format!(
        "INSERT INTO {} (id, account_id, secret, created_at, is_verified) VALUES (?, ?, ?, ?, ?)",
        table_for(purpose)
    )
}

fn delete_unverified_sql(purpose: OtpPurpose) -> String {
    format!(
        "DELETE FROM {} WHERE account_id = ? AND is_verified = FALSE",
        table_for(purpose)
    )
}

#[async_trait]
impl OtpRepository for MySqlOtpRepository {
    async fn create(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        sqlx::query(&insert_sql(record.purpose))
            .bind(record.id.to_string())
            .bind(record.account_id.to_string())
            .bind(&record.secret)
            .bind(record.created_at)
            .bind(record.is_verified)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to insert OTP record"))?;

        Ok(record)
    }

    async fn delete_unverified(&self, account_id: Uuid, purpose: OtpPurpose) -> Result<u64, DomainError> {
        let result = sqlx::query(&delete_unverified_sql(purpose))
            .bind(account_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete unverified OTP records"))?;

        Ok(result.rows_affected())
    }

    async fn replace_unverified(&self, record: OtpRecord) -> Result<OtpRecord, DomainError> {
        let mut tx = self.begin().await?;

        // Lock the owner's rows so concurrent reissues for the pair serialise here
        let lock = format!(
            "SELECT id FROM {} WHERE account_id = ? FOR UPDATE",
            table_for(record.purpose)
        );
        sqlx::query(&lock)
            .bind(record.account_id.to_string())
            .fetch_all(&mut *tx)
            .await
            .map_err(db_error("Failed to lock OTP records"))?;

        let removed = sqlx::query(&delete_unverified_sql(record.purpose))
            .bind(record.account_id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to delete unverified OTP records"))?
            .rows_affected();

        sqlx::query(&insert_sql(record.purpose))
            .bind(record.id.to_string())
            .bind(record.account_id.to_string())
            .bind(&record.secret)
            .bind(record.created_at)
            .bind(record.is_verified)
            .execute(&mut *tx)
            .await
            .map_err(db_error("Failed to insert OTP record"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit OTP replacement"))?;

        tracing::debug!(
            account_id = %record.account_id,
            purpose = %record.purpose,
            removed,
            "Replaced unverified OTP records"
        );

        Ok(record)
    }

    async fn find_latest_unverified(
        &self,
        account_id: Uuid,
        purpose: OtpPurpose,
    ) -> Result<Option<OtpRecord>, DomainError> {
        let query = format!(
            r#"
            SELECT id, account_id, secret, created_at, is_verified
            FROM {}
            WHERE account_id = ? AND is_verified = FALSE
            ORDER BY created_at DESC, seq DESC
            LIMIT 1
            "#,
            table_for(purpose)
        );

        let row = sqlx::query(&query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find OTP record"))?;

        row.as_ref()
            .map(|row| Self::row_to_record(row, purpose))
            .transpose()
    }

    async fn mark_verified(&self, record: &OtpRecord) -> Result<bool, DomainError> {
        let query = format!(
            "UPDATE {} SET is_verified = TRUE WHERE id = ? AND is_verified = FALSE",
            table_for(record.purpose)
        );

        let result = sqlx::query(&query)
            .bind(record.id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to mark OTP record verified"))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purposes_use_separate_tables() {
        assert_eq!(table_for(OtpPurpose::AccountVerification), "account_otps");
        assert_eq!(table_for(OtpPurpose::PasswordReset), "password_reset_otps");
    }
}
