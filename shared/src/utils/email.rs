//! Email address utilities

use once_cell::sync::Lazy;
use regex::Regex;

// Pragmatic address shape: local part, one @, dotted domain with a 2+ letter TLD
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+\-]+@[A-Za-z0-9\-]+(\.[A-Za-z0-9\-]+)*\.[A-Za-z]{2,}$")
        .expect("email regex is valid")
});

/// Maximum length of an address (RFC 5321 path limit)
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Normalize an email address: trim surrounding whitespace and lowercase
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Check if an email address is valid after normalization
pub fn is_valid_email(email: &str) -> bool {
    let normalized = normalize_email(email);
    normalized.len() <= MAX_EMAIL_LENGTH && EMAIL_REGEX.is_match(&normalized)
}

/// Mask an email address for logs (e.g., j***@example.com)
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() => {
            let first: String = local.chars().take(1).collect();
            format!("{}***@{}", first, domain)
        }
        _ => "***".to_string(),
    }
}
