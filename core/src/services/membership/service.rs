//! Membership service implementation

use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::membership::{Membership, MembershipTier};
use crate::errors::{DomainResult, MembershipError};
use crate::repositories::{AccountRepository, MembershipRepository};

/// A newly created membership and the welcome line shown to the member
#[derive(Debug, Clone)]
pub struct JoinedMembership {
    pub membership: Membership,
    pub message: String,
}

/// Enrols accounts in a membership plan
pub struct MembershipService<M: MembershipRepository, A: AccountRepository> {
    memberships: Arc<M>,
    accounts: Arc<A>,
}

impl<M: MembershipRepository, A: AccountRepository> MembershipService<M, A> {
    pub fn new(memberships: Arc<M>, accounts: Arc<A>) -> Self {
        Self {
            memberships,
            accounts,
        }
    }

    /// Join a plan; each account holds at most one membership
    ///
    /// # Returns
    ///
    /// * `Err(MembershipError::AccountNotFound)` - No such account
    /// * `Err(MembershipError::AlreadyMember)` - Account already joined
    pub async fn join(&self, account_id: Uuid, tier: MembershipTier) -> DomainResult<JoinedMembership> {
        let account = self
            .accounts
            .find_by_id(account_id)
            .await?
            .ok_or(MembershipError::AccountNotFound)?;

        if self.memberships.find_by_account(account_id).await?.is_some() {
            return Err(MembershipError::AlreadyMember.into());
        }

        let membership = self
            .memberships
            .create(Membership::new(account_id, tier))
            .await?;

        tracing::info!(
            account_id = %account_id,
            tier = %tier,
            event = "membership_joined",
            "Account joined membership"
        );

        Ok(JoinedMembership {
            membership,
            message: format!(
                "Welcome, {}. You've successfully joined the membership!",
                account.first_name
            ),
        })
    }

    pub async fn get(&self, account_id: Uuid) -> DomainResult<Option<Membership>> {
        self.memberships.find_by_account(account_id).await
    }
}
