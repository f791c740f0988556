//! Repository interfaces for persistence, with in-memory implementations.
//!
//! MySQL implementations live in `apex_infra::database::mysql`.

pub mod account;
pub mod membership;
pub mod newsletter;
pub mod otp;
pub mod token;

pub use account::{AccountRepository, InMemoryAccountRepository};
pub use membership::{InMemoryMembershipRepository, MembershipRepository};
pub use newsletter::{InMemoryNewsletterRepository, NewsletterRepository};
pub use otp::{InMemoryOtpRepository, OtpRepository};
pub use token::{InMemoryTokenRepository, TokenRepository};
