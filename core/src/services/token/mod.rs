//! Token service module for JWT management
//!
//! This module handles:
//! - JWT access token generation and verification (HS256)
//! - Opaque refresh tokens stored as SHA-256 hashes
//! - Refresh token revocation on logout

mod config;
mod service;

#[cfg(test)]
mod tests;

pub use config::TokenServiceConfig;
pub use service::TokenService;
