//! Business services containing domain logic and use cases.

pub mod account;
pub mod auth;
pub mod membership;
pub mod newsletter;
pub mod otp;
pub mod rate_limit;
pub mod token;

// Re-export commonly used types
pub use account::{
    AccountService, PasswordHasher, PasswordResetConfirmation, Registration, RegistrationInput,
};
pub use auth::{AuthService, LoginResult};
pub use membership::{JoinedMembership, MembershipService};
pub use newsletter::{NewsletterService, SubscriptionOutcome};
pub use otp::{
    Clock, IssuedOtp, ManualClock, NotificationSender, OtpCodec, OtpMessage, OtpService, OtpStore,
    SystemClock,
};
pub use rate_limit::{InMemoryRateLimiter, RateLimiter, ThrottledAction};
pub use token::{TokenService, TokenServiceConfig};
