//! bcrypt password hashing

use crate::errors::{DomainError, DomainResult};

/// Hashes and checks passwords with bcrypt
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> DomainResult<String> {
        bcrypt::hash(password, self.cost).map_err(|e| DomainError::Internal {
            message: format!("Failed to hash password: {}", e),
        })
    }

    /// Check a password against a stored hash
    pub fn verify(&self, password: &str, hash: &str) -> DomainResult<bool> {
        bcrypt::verify(password, hash).map_err(|e| DomainError::Internal {
            message: format!("Failed to verify password: {}", e),
        })
    }
}
