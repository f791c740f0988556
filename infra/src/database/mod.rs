//! Database module - MySQL implementations using SQLx
//!
//! This module provides:
//! - Connection pool management
//! - Repository implementations for every core repository trait

pub mod connection;
pub mod mysql;


// Re-export commonly used types
pub use connection::{DatabasePool, PoolStatistics};
pub use mysql::{
    MySqlAccountRepository, MySqlMembershipRepository, MySqlNewsletterRepository,
    MySqlOtpRepository, MySqlTokenRepository,
};
