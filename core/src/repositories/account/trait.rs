//! Account repository trait defining the interface for account persistence.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::account::Account;
use crate::errors::DomainError;

/// Repository trait for Account entity persistence operations
///
/// Emails are stored normalized; callers pass normalized addresses to the
/// lookup methods.
#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Find an account by email address
    ///
    /// # Returns
    /// * `Ok(Some(Account))` - Account found
    /// * `Ok(None)` - No account with that email
    /// * `Err(DomainError)` - Storage error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError>;

    /// Find an account by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError>;

    /// Insert a new account
    ///
    /// # Returns
    /// * `Ok(Account)` - The stored account
    /// * `Err(DomainError::Auth(AuthError::EmailAlreadyRegistered))` - Email is taken
    async fn create(&self, account: Account) -> Result<Account, DomainError>;

    /// Persist changes to an existing account
    async fn update(&self, account: Account) -> Result<Account, DomainError>;

    /// Check whether an account with the email exists
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
