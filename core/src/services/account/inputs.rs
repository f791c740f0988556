//! Request inputs for account operations and their validation rules

use serde::Deserialize;

use apex_shared::email::is_valid_email;
use apex_shared::validation::validators;
use apex_shared::{Validate, ValidationErrors};

pub const MIN_PASSWORD_LENGTH: usize = 8;
/// bcrypt only reads the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;
pub const MAX_NAME_LENGTH: usize = 150;

/// New account details
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationInput {
    pub email: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub password: String,
    pub password_confirm: String,
}

/// New password authorized by a reset code
#[derive(Debug, Clone, Deserialize)]
pub struct PasswordResetConfirmation {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if !validators::not_empty(email) {
        errors.add_error("email", "Email is required", "REQUIRED_FIELD");
    } else if !is_valid_email(email) {
        errors.add_error("email", "Enter a valid email address", "INVALID_EMAIL");
    }
}

fn check_password(errors: &mut ValidationErrors, field: &str, password: &str) {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.add_error(
            field,
            format!("Password must be at least {} characters", MIN_PASSWORD_LENGTH),
            "INVALID_LENGTH",
        );
    } else if password.len() > MAX_PASSWORD_BYTES {
        errors.add_error(
            field,
            format!("Password must be at most {} bytes", MAX_PASSWORD_BYTES),
            "INVALID_LENGTH",
        );
    }
}

impl Validate for RegistrationInput {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_email(&mut errors, &self.email);

        if !validators::not_empty(&self.first_name) {
            errors.add_error("first_name", "First name is required", "REQUIRED_FIELD");
        } else if !validators::length_between(&self.first_name, 1, MAX_NAME_LENGTH) {
            errors.add_error("first_name", "First name is too long", "INVALID_LENGTH");
        }
        if !validators::length_between(&self.last_name, 0, MAX_NAME_LENGTH) {
            errors.add_error("last_name", "Last name is too long", "INVALID_LENGTH");
        }

        check_password(&mut errors, "password", &self.password);
        if self.password != self.password_confirm {
            errors.add_error("password_confirm", "Passwords do not match", "PASSWORD_MISMATCH");
        }

        errors.into_result()
    }
}

impl Validate for PasswordResetConfirmation {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();

        check_email(&mut errors, &self.email);
        if !validators::not_empty(&self.code) {
            errors.add_error("code", "OTP is required", "REQUIRED_FIELD");
        }
        check_password(&mut errors, "new_password", &self.new_password);

        errors.into_result()
    }
}
