//! Domain entities representing core business objects.

pub mod account;
pub mod membership;
pub mod newsletter;
pub mod otp_record;
pub mod token;


pub use account::Account;
pub use membership::{Membership, MembershipTier};
pub use newsletter::NewsletterSubscriber;
pub use otp_record::{OtpPurpose, OtpRecord};
pub use token::{Claims, RefreshToken, TokenPair};
