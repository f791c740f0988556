//! Account lifecycle: registration, email verification and password reset

mod inputs;
mod password;
mod service;
mod types;

#[cfg(test)]
mod tests;

pub use inputs::{
    PasswordResetConfirmation, RegistrationInput, MAX_NAME_LENGTH, MAX_PASSWORD_BYTES,
    MIN_PASSWORD_LENGTH,
};
pub use password::PasswordHasher;
pub use service::AccountService;
pub use types::Registration;
