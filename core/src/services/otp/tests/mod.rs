//! Tests for the OTP codec, store and workflow

#[cfg(test)]
pub(crate) mod mocks;
