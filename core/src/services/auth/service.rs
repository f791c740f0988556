//! Main authentication service implementation

use std::sync::Arc;

use apex_shared::email::{mask_email, normalize_email};

use crate::errors::{AuthError, DomainError, DomainResult, TokenError};
use crate::repositories::{AccountRepository, TokenRepository};
use crate::services::account::PasswordHasher;
use crate::services::rate_limit::{RateLimiter, ThrottledAction};
use crate::services::token::TokenService;

use super::types::LoginResult;

/// Authentication service for password login and session tokens
pub struct AuthService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    /// Account repository for credential lookups
    accounts: Arc<A>,
    /// Token service for JWT management
    token_service: Arc<TokenService<T>>,
    hasher: PasswordHasher,
    /// Login attempt throttle, keyed by normalized email
    limiter: Arc<dyn RateLimiter>,
}

impl<A, T> AuthService<A, T>
where
    A: AccountRepository,
    T: TokenRepository,
{
    pub fn new(
        accounts: Arc<A>,
        token_service: Arc<TokenService<T>>,
        hasher: PasswordHasher,
        limiter: Arc<dyn RateLimiter>,
    ) -> Self {
        Self {
            accounts,
            token_service,
            hasher,
            limiter,
        }
    }

    /// Log in with email and password
    ///
    /// Unknown emails and wrong passwords produce the same error. Verification
    /// and activity are only reported once the password matched.
    ///
    /// # Returns
    ///
    /// * `Ok(LoginResult)` - Account and fresh token pair
    /// * `Err(AuthError::RateLimited)` - Too many attempts for this email
    /// * `Err(AuthError::InvalidCredentials)` - Unknown email or wrong password
    /// * `Err(AuthError::AccountNotVerified)` - Email not yet confirmed
    /// * `Err(AuthError::AccountInactive)` - Account disabled
    pub async fn login(&self, email: &str, password: &str) -> DomainResult<LoginResult> {
        let email = normalize_email(email);
        self.limiter.check(ThrottledAction::Login, &email).await?;

        let account = match self.accounts.find_by_email(&email).await? {
            Some(account) if self.hasher.verify(password, &account.password_hash)? => account,
            _ => {
                tracing::warn!(
                    email = %mask_email(&email),
                    event = "login_failed",
                    "Invalid login credentials"
                );
                return Err(AuthError::InvalidCredentials.into());
            }
        };

        if !account.is_verified {
            return Err(AuthError::AccountNotVerified.into());
        }
        if !account.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        let tokens = self.token_service.generate_tokens(&account).await?;

        tracing::info!(
            account_id = %account.id,
            email = %mask_email(&account.email),
            event = "login_succeeded",
            "Account logged in"
        );

        Ok(LoginResult { account, tokens })
    }

    /// Log out by revoking the refresh token
    ///
    /// The account itself is left untouched, so it can log in again.
    pub async fn logout(&self, refresh_token: &str) -> DomainResult<()> {
        let token = self.token_service.verify_refresh_token(refresh_token).await?;
        self.token_service.revoke_refresh_token(refresh_token).await?;

        tracing::info!(
            account_id = %token.account_id,
            event = "logout",
            "Refresh token revoked"
        );

        Ok(())
    }

    /// Issue a new access token from a valid refresh token
    pub async fn refresh_access_token(&self, refresh_token: &str) -> DomainResult<String> {
        let token = self.token_service.verify_refresh_token(refresh_token).await?;

        let account = self
            .accounts
            .find_by_id(token.account_id)
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if !account.is_active {
            return Err(AuthError::AccountInactive.into());
        }

        self.token_service.generate_access_token(&account)
    }
}
