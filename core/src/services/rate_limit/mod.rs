//! Per-email throttling for login and OTP operations

mod memory;
mod traits;

#[cfg(test)]
mod tests;

pub use memory::InMemoryRateLimiter;
pub use traits::{RateLimiter, ThrottledAction};
