//! In-memory implementation of AccountRepository

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::{AuthError, DomainError};

use super::r#trait::AccountRepository;

/// Accounts held in process memory
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl Default for InMemoryAccountRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccountRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.get(&id).cloned())
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailAlreadyRegistered.into());
        }

        accounts.insert(account.id, account.clone());
        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let mut accounts = self.accounts.write().await;

        match accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account.clone();
                Ok(account)
            }
            None => Err(DomainError::NotFound {
                resource: format!("Account with id {}", account.id),
            }),
        }
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().any(|a| a.email == email))
    }
}
