//! Types for authentication results

use serde::Serialize;

use crate::domain::entities::account::Account;
use crate::domain::entities::token::TokenPair;

/// Successful login
#[derive(Debug, Clone, Serialize)]
pub struct LoginResult {
    pub account: Account,
    pub tokens: TokenPair,
}
