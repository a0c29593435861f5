//! Validated email addresses.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Validation errors raised by [`EmailAddress::new`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmailValidationError {
    /// The address was empty or whitespace.
    #[error("email address must not be empty")]
    Empty,
    /// The address did not look like `local@domain.tld`.
    #[error("email address is not well formed")]
    Malformed,
}

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// An email address that passed format validation.
///
/// Surrounding whitespace is rejected rather than trimmed, so the stored value
/// is always exactly what the client sent.
///
/// # Examples
/// ```
/// use gift_exchange_backend::domain::EmailAddress;
///
/// let email = EmailAddress::new("a@example.com").expect("valid email");
/// assert_eq!(email.as_ref(), "a@example.com");
/// assert!(EmailAddress::new("not-an-email").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and construct an [`EmailAddress`].
    pub fn new(raw: impl Into<String>) -> Result<Self, EmailValidationError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(EmailValidationError::Empty);
        }
        if !email_regex().is_match(&raw) {
            return Err(EmailValidationError::Malformed);
        }
        Ok(Self(raw))
    }
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

impl TryFrom<String> for EmailAddress {
    type Error = EmailValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a@example.com")]
    #[case("first.last+tag@sub.example.org")]
    fn accepts_well_formed_addresses(#[case] raw: &str) {
        assert!(EmailAddress::new(raw).is_ok());
    }

    #[rstest]
    #[case("", EmailValidationError::Empty)]
    #[case("  ", EmailValidationError::Empty)]
    #[case("no-at-sign.example.com", EmailValidationError::Malformed)]
    #[case("a@nodot", EmailValidationError::Malformed)]
    #[case("a b@example.com", EmailValidationError::Malformed)]
    #[case(" a@example.com", EmailValidationError::Malformed)]
    fn rejects_malformed_addresses(#[case] raw: &str, #[case] expected: EmailValidationError) {
        assert_eq!(EmailAddress::new(raw), Err(expected));
    }
}
