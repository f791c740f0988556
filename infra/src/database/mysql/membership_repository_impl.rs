//! MySQL implementation of the MembershipRepository trait.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{MySqlPool, Row};
use uuid::Uuid;

use apex_core::domain::entities::membership::{Membership, MembershipTier};
use apex_core::errors::{DomainError, MembershipError};
use apex_core::repositories::MembershipRepository;

use super::{db_error, is_duplicate_key};

/// MySQL implementation of MembershipRepository
///
/// `memberships.account_id` is unique, which enforces one membership per account.
pub struct MySqlMembershipRepository {
    pool: MySqlPool,
}

impl MySqlMembershipRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    fn row_to_membership(row: &sqlx::mysql::MySqlRow) -> Result<Membership, DomainError> {
        let id: String = row
            .try_get("id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get id: {}", e) })?;
        let account_id: String = row
            .try_get("account_id")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get account_id: {}", e) })?;
        let tier: String = row
            .try_get("tier")
            .map_err(|e| DomainError::Internal { message: format!("Failed to get tier: {}", e) })?;

        Ok(Membership {
            id: Uuid::parse_str(&id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid membership UUID: {}", e) })?,
            account_id: Uuid::parse_str(&account_id)
                .map_err(|e| DomainError::Internal { message: format!("Invalid account UUID: {}", e) })?,
            tier: tier
                .parse::<MembershipTier>()
                .map_err(|message| DomainError::Internal { message })?,
            joined_at: row
                .try_get::<DateTime<Utc>, _>("joined_at")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get joined_at: {}", e) })?,
            is_active: row
                .try_get("is_active")
                .map_err(|e| DomainError::Internal { message: format!("Failed to get is_active: {}", e) })?,
        })
    }
}

#[async_trait]
impl MembershipRepository for MySqlMembershipRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Membership>, DomainError> {
        let query = r#"
            SELECT id, account_id, tier, joined_at, is_active
            FROM memberships
            WHERE account_id = ?
            LIMIT 1
        "#;

        let row = sqlx::query(query)
            .bind(account_id.to_string())
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to find membership"))?;

        row.as_ref().map(Self::row_to_membership).transpose()
    }

    async fn create(&self, membership: Membership) -> Result<Membership, DomainError> {
        let query = r#"
            INSERT INTO memberships (id, account_id, tier, joined_at, is_active)
            VALUES (?, ?, ?, ?, ?)
        "#;

        sqlx::query(query)
            .bind(membership.id.to_string())
            .bind(membership.account_id.to_string())
            .bind(membership.tier.as_str())
            .bind(membership.joined_at)
            .bind(membership.is_active)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_duplicate_key(&e) {
                    DomainError::Membership(MembershipError::AlreadyMember)
                } else {
                    DomainError::Internal { message: format!("Failed to create membership: {}", e) }
                }
            })?;

        Ok(membership)
    }
}
