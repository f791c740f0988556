//! Token repository trait defining the interface for refresh token persistence.

use async_trait::async_trait;

use crate::domain::entities::token::RefreshToken;
use crate::errors::DomainError;

/// Repository trait for RefreshToken entity persistence operations
///
/// # Security Considerations
/// - Tokens are hashed before storage; only hashes reach this trait
/// - Revoked tokens must be rejected by every lookup consumer
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Save a new refresh token
    ///
    /// # Returns
    /// * `Ok(RefreshToken)` - The saved token
    /// * `Err(DomainError)` - Save failed (e.g., duplicate hash)
    async fn save_refresh_token(&self, token: RefreshToken) -> Result<RefreshToken, DomainError>;

    /// Find a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(Some(RefreshToken))` - Token found, revoked or not
    /// * `Ok(None)` - No token found with given hash
    async fn find_refresh_token(&self, token_hash: &str)
        -> Result<Option<RefreshToken>, DomainError>;

    /// Revoke a refresh token by its hashed value
    ///
    /// # Returns
    /// * `Ok(true)` - Token was found and revoked
    /// * `Ok(false)` - No token with that hash
    async fn revoke_token(&self, token_hash: &str) -> Result<bool, DomainError>;
}
