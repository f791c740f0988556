//! Main token service implementation

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use rand::distributions::Alphanumeric;
use rand::Rng;
use sha2::{Digest, Sha256};
use std::sync::Arc;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::{Claims, RefreshToken, TokenPair};
use crate::errors::{DomainError, TokenError};
use crate::repositories::TokenRepository;

use super::config::TokenServiceConfig;

/// Length of the opaque refresh token handed to clients
const REFRESH_TOKEN_LENGTH: usize = 48;

/// Service for managing JWT access tokens and refresh tokens
pub struct TokenService<R: TokenRepository> {
    repository: Arc<R>,
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl<R: TokenRepository> TokenService<R> {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `repository` - Token repository for persistence
    /// * `config` - Token service configuration
    pub fn new(repository: Arc<R>, config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::new(config.algorithm);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_audience(&[config.audience.as_str()]);
        validation.validate_exp = true;
        validation.validate_nbf = true;

        Self {
            repository,
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Generates a new token pair (access + refresh tokens) for an account
    ///
    /// # Returns
    ///
    /// * `Ok(TokenPair)` - The generated token pair
    /// * `Err(TokenError::TokenGenerationFailed)` - Signing or storage failed
    pub async fn generate_tokens(&self, account: &Account) -> Result<TokenPair, DomainError> {
        let access_token = self.generate_access_token(account)?;
        let refresh_token = self.generate_refresh_token(account).await?;

        Ok(TokenPair::new(
            access_token,
            refresh_token,
            self.config.access_lifetime(),
            self.config.refresh_lifetime(),
        ))
    }

    /// Issues a new access token for the account behind a valid refresh token
    pub fn generate_access_token(&self, account: &Account) -> Result<String, DomainError> {
        let claims = Claims::new_access_token(
            account.id,
            &account.email,
            account.is_verified,
            self.config.access_lifetime(),
            &self.config.issuer,
            &self.config.audience,
        );
        self.encode_jwt(&claims)
    }

    /// Generates a refresh token and stores its hash
    async fn generate_refresh_token(&self, account: &Account) -> Result<String, DomainError> {
        let token_string: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(REFRESH_TOKEN_LENGTH)
            .map(char::from)
            .collect();

        let refresh_token = RefreshToken::new(
            account.id,
            self.hash_token(&token_string),
            self.config.refresh_lifetime(),
        );

        self.repository
            .save_refresh_token(refresh_token)
            .await
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))?;

        Ok(token_string)
    }

    fn encode_jwt(&self, claims: &Claims) -> Result<String, DomainError> {
        let header = Header::new(self.config.algorithm);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    /// Verifies an access token and returns the claims
    ///
    /// # Returns
    ///
    /// * `Ok(Claims)` - The decoded claims if valid
    /// * `Err(TokenError)` - Token is invalid, expired, or malformed
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, DomainError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => DomainError::Token(TokenError::TokenExpired),
                ErrorKind::ImmatureSignature => DomainError::Token(TokenError::TokenNotYetValid),
                _ => DomainError::Token(TokenError::InvalidTokenFormat),
            })
    }

    /// Looks up a refresh token and checks it is still usable
    ///
    /// # Returns
    ///
    /// * `Ok(RefreshToken)` - Stored token record
    /// * `Err(TokenError)` - Unknown, expired, or revoked
    pub async fn verify_refresh_token(&self, token: &str) -> Result<RefreshToken, DomainError> {
        let refresh_token = self
            .repository
            .find_refresh_token(&self.hash_token(token))
            .await?
            .ok_or(DomainError::Token(TokenError::InvalidRefreshToken))?;

        if refresh_token.is_revoked {
            return Err(DomainError::Token(TokenError::TokenRevoked));
        }

        if refresh_token.is_expired() {
            return Err(DomainError::Token(TokenError::RefreshTokenExpired));
        }

        Ok(refresh_token)
    }

    /// Revokes a specific refresh token
    ///
    /// # Returns
    ///
    /// * `Ok(bool)` - True if token was revoked, false if not found
    pub async fn revoke_refresh_token(&self, token: &str) -> Result<bool, DomainError> {
        self.repository.revoke_token(&self.hash_token(token)).await
    }

    /// Hashes a token for storage
    pub(crate) fn hash_token(&self, token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}
