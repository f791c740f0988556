//! In-memory implementation of MembershipRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::membership::Membership;
use crate::errors::{DomainError, MembershipError};

use super::r#trait::MembershipRepository;

/// Memberships held in process memory, keyed by account
pub struct InMemoryMembershipRepository {
    memberships: Arc<RwLock<HashMap<Uuid, Membership>>>,
}

impl InMemoryMembershipRepository {
    pub fn new() -> Self {
        Self {
            memberships: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryMembershipRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MembershipRepository for InMemoryMembershipRepository {
    async fn find_by_account(&self, account_id: Uuid) -> Result<Option<Membership>, DomainError> {
        let memberships = self.memberships.read().await;
        Ok(memberships.get(&account_id).cloned())
    }

    async fn create(&self, membership: Membership) -> Result<Membership, DomainError> {
        let mut memberships = self.memberships.write().await;

        if memberships.contains_key(&membership.account_id) {
            return Err(MembershipError::AlreadyMember.into());
        }

        memberships.insert(membership.account_id, membership.clone());
        Ok(membership)
    }
}
