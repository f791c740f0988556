//! One-time password module for email-based account flows
//!
//! This module provides:
//! - A TOTP codec (HMAC-SHA1, 600-second steps by default)
//! - A record store that keeps one pending record per account and purpose
//! - The issue-and-send and verify workflow shared by registration and password reset

mod clock;
mod codec;
mod service;
mod store;
mod traits;
mod types;

#[cfg(test)]
pub(crate) mod tests;

pub use clock::{Clock, ManualClock, SystemClock};
pub use codec::{OtpCodec, SECRET_BYTES};
pub use service::OtpService;
pub use store::OtpStore;
pub use traits::NotificationSender;
pub use types::{IssuedOtp, OtpMessage};
