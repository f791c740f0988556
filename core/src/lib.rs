//! # Apex Core
//!
//! Core business logic and domain layer for the Apex Gym backend.
//! This crate contains domain entities, business services, repository interfaces,
//! and error types. Storage and delivery backends live in `apex_infra`.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    Account, Claims, Membership, MembershipTier, NewsletterSubscriber, OtpPurpose, OtpRecord,
    RefreshToken, TokenPair,
};
pub use errors::{
    AuthError, DomainError, DomainResult, ErrorResponse, MembershipError, OtpError, TokenError,
    ValidationError,
};
pub use repositories::{
    AccountRepository, MembershipRepository, NewsletterRepository, OtpRepository, TokenRepository,
};
pub use services::{
    AccountService, AuthService, Clock, InMemoryRateLimiter, ManualClock, MembershipService,
    NewsletterService, NotificationSender, OtpCodec, OtpService, OtpStore, RateLimiter,
    SystemClock, ThrottledAction, TokenService,
};
