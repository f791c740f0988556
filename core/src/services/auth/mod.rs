//! Authentication service module
//!
//! Password login for verified accounts, logout by refresh token revocation,
//! and access token renewal.

mod service;
mod types;

#[cfg(test)]
mod tests;

pub use service::AuthService;
pub use types::LoginResult;
