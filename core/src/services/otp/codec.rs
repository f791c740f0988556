//! Time-based one-time password codec
//!
//! Codes follow RFC 6238 with HMAC-SHA1 and a configurable step (600 seconds
//! by default), so secrets issued by older deployments keep verifying. A code
//! is a pure function of the secret and the time step; nothing about it is
//! stored.

use chrono::{DateTime, Utc};
use constant_time_eq::constant_time_eq;
use data_encoding::BASE32_NOPAD;
use hmac::{Hmac, Mac};
use rand::{rngs::OsRng, RngCore};
use sha1::Sha1;

use apex_shared::OtpConfig;

use crate::errors::{DomainError, DomainResult};

type HmacSha1 = Hmac<Sha1>;

/// Random bytes behind a secret; encodes to 32 base32 characters
pub const SECRET_BYTES: usize = 20;

/// Generates and checks TOTP codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OtpCodec {
    step_seconds: u64,
    digits: u32,
}

impl Default for OtpCodec {
    fn default() -> Self {
        Self::from_config(&OtpConfig::default())
    }
}

impl OtpCodec {
    /// Create a codec
    ///
    /// # Arguments
    ///
    /// * `step_seconds` - Length of one time step; must be non-zero
    /// * `digits` - Code length
    pub fn new(step_seconds: u64, digits: u32) -> Self {
        Self {
            step_seconds: step_seconds.max(1),
            digits,
        }
    }

    pub fn from_config(config: &OtpConfig) -> Self {
        Self::new(config.step_seconds, config.digits)
    }

    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// Generate a fresh 160-bit secret, base32 encoded without padding
    pub fn generate_secret() -> String {
        let mut bytes = [0u8; SECRET_BYTES];
        OsRng.fill_bytes(&mut bytes);
        BASE32_NOPAD.encode(&bytes)
    }

    /// Time step containing `now`
    pub fn time_step(&self, now: DateTime<Utc>) -> u64 {
        now.timestamp().max(0) as u64 / self.step_seconds
    }

    /// Code for the step containing `now`
    pub fn current_code(&self, secret: &str, now: DateTime<Utc>) -> DomainResult<String> {
        self.code_at_step(secret, self.time_step(now))
    }

    /// Code for an explicit step counter (RFC 4226 HOTP)
    pub fn code_at_step(&self, secret: &str, step: u64) -> DomainResult<String> {
        let key = decode_secret(secret)?;
        let mut mac = <HmacSha1 as Mac>::new_from_slice(&key).map_err(|e| DomainError::Internal {
            message: format!("Invalid OTP key: {}", e),
        })?;
        mac.update(&step.to_be_bytes());
        let hash = mac.finalize().into_bytes();

        // Dynamic truncation
        let offset = (hash[hash.len() - 1] & 0x0f) as usize;
        let binary = (u32::from(hash[offset]) & 0x7f) << 24
            | u32::from(hash[offset + 1]) << 16
            | u32::from(hash[offset + 2]) << 8
            | u32::from(hash[offset + 3]);

        let code = binary % 10u32.pow(self.digits);
        Ok(format!("{:0width$}", code, width = self.digits as usize))
    }

    /// Check `submitted` against the steps `current - window ..= current + window`
    ///
    /// Anything other than exactly `digits` ASCII digits never matches.
    /// Comparisons are constant-time.
    pub fn verify(
        &self,
        secret: &str,
        submitted: &str,
        now: DateTime<Utc>,
        window: u64,
    ) -> DomainResult<bool> {
        if submitted.len() != self.digits as usize
            || !submitted.bytes().all(|b| b.is_ascii_digit())
        {
            return Ok(false);
        }

        let current = self.time_step(now);
        let first = current.saturating_sub(window);
        let last = current.saturating_add(window);

        let mut matched = false;
        for step in first..=last {
            let expected = self.code_at_step(secret, step)?;
            matched |= constant_time_eq(expected.as_bytes(), submitted.as_bytes());
        }
        Ok(matched)
    }
}

fn decode_secret(secret: &str) -> DomainResult<Vec<u8>> {
    let normalized = secret.trim().trim_end_matches('=').to_ascii_uppercase();
    BASE32_NOPAD
        .decode(normalized.as_bytes())
        .map_err(|e| DomainError::Internal {
            message: format!("Stored OTP secret is not valid base32: {}", e),
        })
}
