//! Unvalidated demo request submissions and their validation rules.

use std::fmt;

use super::{BusinessName, ContactName, EmailAddress, NewDemoRequest, PhoneNumber};

/// Raw value of one submitted field before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftValue {
    /// The field was absent or explicitly null.
    Missing,
    /// The field was present but not a string.
    NotText,
    /// The field carried a string.
    Text(String),
}

impl From<Option<String>> for DraftValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Missing, Self::Text)
    }
}

impl From<&str> for DraftValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// Field of the demo request schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DemoRequestField {
    /// `businessName`.
    BusinessName,
    /// `contactName`.
    ContactName,
    /// `email`.
    Email,
    /// `phone`.
    Phone,
}

impl DemoRequestField {
    /// Field name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BusinessName => "businessName",
            Self::ContactName => "contactName",
            Self::Email => "email",
            Self::Phone => "phone",
        }
    }
}

impl fmt::Display for DemoRequestField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rule a submitted field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViolationCode {
    /// Absent or null.
    MissingField,
    /// Present but not a string.
    InvalidType,
    /// Empty, or blank where trimming applies.
    EmptyField,
    /// Not shaped like an email address.
    InvalidEmail,
}

impl ViolationCode {
    /// Stable machine-readable code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MissingField => "missing_field",
            Self::InvalidType => "invalid_type",
            Self::EmptyField => "empty_field",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// One failing field and the rule it broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldViolation {
    field: DemoRequestField,
    code: ViolationCode,
}

impl FieldViolation {
    /// Record that `field` failed with `code`.
    pub fn new(field: DemoRequestField, code: ViolationCode) -> Self {
        Self { field, code }
    }

    /// Offending field.
    pub fn field(&self) -> DemoRequestField {
        self.field
    }

    /// Machine-readable reason.
    pub fn code(&self) -> ViolationCode {
        self.code
    }

    /// Human-readable explanation of the violation.
    pub fn message(&self) -> String {
        let field = self.field;
        match self.code {
            ViolationCode::MissingField => format!("{field} is required"),
            ViolationCode::InvalidType => format!("{field} must be a string"),
            ViolationCode::EmptyField => format!("{field} must not be empty"),
            ViolationCode::InvalidEmail => format!("{field} must be a valid email address"),
        }
    }
}

/// Every violation found in a rejected submission, in schema order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("demo request failed validation on {} field(s)", .violations.len())]
pub struct DemoRequestValidationError {
    violations: Vec<FieldViolation>,
}

impl DemoRequestValidationError {
    /// Violations in schema order; never empty.
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

/// Submission as received from a client.
///
/// # Examples
/// ```
/// use goloyal::domain::DemoRequestDraft;
///
/// let draft = DemoRequestDraft::from_text("Corner Coffee", "Ada", "ada@example.com", "555-0100");
/// let request = draft.validate().expect("valid submission");
/// assert_eq!(request.email().as_ref(), "ada@example.com");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRequestDraft {
    /// Raw `businessName` value.
    pub business_name: DraftValue,
    /// Raw `contactName` value.
    pub contact_name: DraftValue,
    /// Raw `email` value.
    pub email: DraftValue,
    /// Raw `phone` value.
    pub phone: DraftValue,
}

impl DemoRequestDraft {
    /// Build a draft where every field was submitted as text.
    pub fn from_text(
        business_name: impl Into<String>,
        contact_name: impl Into<String>,
        email: impl Into<String>,
        phone: impl Into<String>,
    ) -> Self {
        Self {
            business_name: DraftValue::Text(business_name.into()),
            contact_name: DraftValue::Text(contact_name.into()),
            email: DraftValue::Text(email.into()),
            phone: DraftValue::Text(phone.into()),
        }
    }

    /// Check every field and either produce a validated request or report all
    /// failing fields at once.
    pub fn validate(self) -> Result<NewDemoRequest, DemoRequestValidationError> {
        let mut violations = Vec::new();
        let business_name = check(
            DemoRequestField::BusinessName,
            self.business_name,
            BusinessName::new,
            &mut violations,
        );
        let contact_name = check(
            DemoRequestField::ContactName,
            self.contact_name,
            ContactName::new,
            &mut violations,
        );
        let email = check(
            DemoRequestField::Email,
            self.email,
            EmailAddress::new,
            &mut violations,
        );
        let phone = check(
            DemoRequestField::Phone,
            self.phone,
            PhoneNumber::new,
            &mut violations,
        );

        match (business_name, contact_name, email, phone) {
            (Some(business_name), Some(contact_name), Some(email), Some(phone)) => Ok(
                NewDemoRequest::new(business_name, contact_name, email, phone),
            ),
            _ => Err(DemoRequestValidationError { violations }),
        }
    }
}

fn check<T>(
    field: DemoRequestField,
    value: DraftValue,
    parse: impl FnOnce(String) -> Result<T, ViolationCode>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T> {
    let outcome = match value {
        DraftValue::Missing => Err(ViolationCode::MissingField),
        DraftValue::NotText => Err(ViolationCode::InvalidType),
        DraftValue::Text(text) => parse(text),
    };
    match outcome {
        Ok(parsed) => Some(parsed),
        Err(code) => {
            violations.push(FieldViolation::new(field, code));
            None
        }
    }
}
