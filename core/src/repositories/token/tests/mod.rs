//! Unit tests for the in-memory token repository

use chrono::Duration;
use uuid::Uuid;

use crate::domain::entities::token::RefreshToken;
use crate::repositories::token::{InMemoryTokenRepository, TokenRepository};

#[tokio::test]
async fn test_save_find_revoke() {
    let repo = InMemoryTokenRepository::new();
    let token = RefreshToken::new(Uuid::new_v4(), "hash".to_string(), Duration::days(7));

    repo.save_refresh_token(token.clone()).await.unwrap();
    assert!(repo.save_refresh_token(token).await.is_err());

    assert!(repo.revoke_token("hash").await.unwrap());
    assert!(!repo.revoke_token("missing").await.unwrap());

    let stored = repo.find_refresh_token("hash").await.unwrap().unwrap();
    assert!(stored.is_revoked);
}
