//! Validated field values carried by a demo request.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;

use super::ViolationCode;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        // Dot-separated atoms on the left; hostname labels and an alphabetic
        // TLD on the right.
        let pattern = concat!(
            r"^[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[A-Za-z0-9!#$%&'*+/=?^_`{|}~-]+)*",
            r"@(?:[A-Za-z0-9](?:[A-Za-z0-9-]*[A-Za-z0-9])?\.)+[A-Za-z]{2,}$",
        );
        Regex::new(pattern).unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn non_blank(value: String) -> Result<String, ViolationCode> {
    if value.trim().is_empty() {
        Err(ViolationCode::EmptyField)
    } else {
        Ok(value)
    }
}

/// Name of the prospect's business.
///
/// Must contain at least one non-whitespace character. The submitted text is
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessName(String);

impl BusinessName {
    /// Validate and wrap a business name.
    pub fn new(value: impl Into<String>) -> Result<Self, ViolationCode> {
        non_blank(value.into()).map(Self)
    }
}

/// Name of the person to contact about the demo.
///
/// Must contain at least one non-whitespace character. The submitted text is
/// kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    /// Validate and wrap a contact name.
    pub fn new(value: impl Into<String>) -> Result<Self, ViolationCode> {
        non_blank(value.into()).map(Self)
    }
}

/// Syntactically valid email address.
///
/// # Examples
/// ```
/// use goloyal::domain::{EmailAddress, ViolationCode};
///
/// assert!(EmailAddress::new("demo@example.com").is_ok());
/// assert_eq!(EmailAddress::new("not-an-email"), Err(ViolationCode::InvalidEmail));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and wrap an email address.
    pub fn new(value: impl Into<String>) -> Result<Self, ViolationCode> {
        let value = value.into();
        if email_regex().is_match(&value) {
            Ok(Self(value))
        } else {
            Err(ViolationCode::InvalidEmail)
        }
    }
}

/// Free-form phone number. Only emptiness is rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Validate and wrap a phone number.
    pub fn new(value: impl Into<String>) -> Result<Self, ViolationCode> {
        let value = value.into();
        if value.is_empty() {
            Err(ViolationCode::EmptyField)
        } else {
            Ok(Self(value))
        }
    }
}

macro_rules! text_field_traits {
    ($($name:ident),* $(,)?) => {
        $(
            impl AsRef<str> for $name {
                fn as_ref(&self) -> &str {
                    self.0.as_str()
                }
            }

            impl fmt::Display for $name {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_ref())
                }
            }

            impl From<$name> for String {
                fn from(value: $name) -> Self {
                    value.0
                }
            }
        )*
    };
}

text_field_traits!(BusinessName, ContactName, EmailAddress, PhoneNumber);
