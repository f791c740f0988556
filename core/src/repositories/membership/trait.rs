//! Membership repository trait.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::membership::Membership;
use crate::errors::DomainError;

/// Repository trait for gym memberships; one membership per account
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Find the membership held by an account
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Membership>, DomainError>;

    /// Insert a membership
    ///
    /// # Returns
    /// * `Err(DomainError::Membership(MembershipError::AlreadyMember))` - Account already has one
    async fn create(&self, membership: Membership) -> Result<Membership, DomainError>;
}
