//! MySQL repository implementations

mod account_repository_impl;
mod membership_repository_impl;
mod newsletter_repository_impl;
mod otp_repository_impl;
mod token_repository_impl;

pub use account_repository_impl::MySqlAccountRepository;
pub use membership_repository_impl::MySqlMembershipRepository;
pub use newsletter_repository_impl::MySqlNewsletterRepository;
pub use otp_repository_impl::MySqlOtpRepository;
pub use token_repository_impl::MySqlTokenRepository;

use apex_core::errors::DomainError;

/// Wrap a SQLx failure as an internal domain error with context
pub(crate) fn db_error(context: &str) -> impl Fn(sqlx::Error) -> DomainError + '_ {
    move |e| DomainError::Internal {
        message: format!("{}: {}", context, e),
    }
}

/// Unique index violation (ER_DUP_ENTRY)
pub(crate) fn is_duplicate_key(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}
