//! Demo request aggregate.
//!
//! A demo request records a prospect asking for a product walkthrough. It is
//! created once through the intake path and never changes afterwards.
//!
//! ## Invariants
//! - `id` is generated by the store at creation and never reused.
//! - `created_at` is set by the store at creation.
//! - Field values have passed [`DemoRequestDraft::validate`].

mod draft;
mod fields;

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub use draft::{
    DemoRequestDraft, DemoRequestField, DemoRequestValidationError, DraftValue, FieldViolation,
    ViolationCode,
};
pub use fields::{BusinessName, ContactName, EmailAddress, PhoneNumber};

/// Opaque identifier of a stored demo request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DemoRequestId(Uuid);

impl DemoRequestId {
    /// Generate a new random identifier.
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID, e.g. one parsed from a path.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for DemoRequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for DemoRequestId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(Uuid::parse_str(s)?))
    }
}

/// Validated submission waiting to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDemoRequest {
    business_name: BusinessName,
    contact_name: ContactName,
    email: EmailAddress,
    phone: PhoneNumber,
}

impl NewDemoRequest {
    /// Bundle already-validated fields.
    pub fn new(
        business_name: BusinessName,
        contact_name: ContactName,
        email: EmailAddress,
        phone: PhoneNumber,
    ) -> Self {
        Self {
            business_name,
            contact_name,
            email,
            phone,
        }
    }

    /// Prospect's business.
    pub fn business_name(&self) -> &BusinessName {
        &self.business_name
    }

    /// Person to contact.
    pub fn contact_name(&self) -> &ContactName {
        &self.contact_name
    }

    /// Contact email address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Contact phone number, verbatim.
    pub fn phone(&self) -> &PhoneNumber {
        &self.phone
    }
}

/// Stored demo request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DemoRequest {
    id: DemoRequestId,
    fields: NewDemoRequest,
    created_at: DateTime<Utc>,
}

impl DemoRequest {
    /// Assemble a stored record. Only stores should call this.
    pub fn new(id: DemoRequestId, fields: NewDemoRequest, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            fields,
            created_at,
        }
    }

    /// Identifier assigned by the store.
    pub fn id(&self) -> DemoRequestId {
        self.id
    }

    /// Prospect's business.
    pub fn business_name(&self) -> &BusinessName {
        self.fields.business_name()
    }

    /// Person to contact.
    pub fn contact_name(&self) -> &ContactName {
        self.fields.contact_name()
    }

    /// Contact email address.
    pub fn email(&self) -> &EmailAddress {
        self.fields.email()
    }

    /// Contact phone number, verbatim.
    pub fn phone(&self) -> &PhoneNumber {
        self.fields.phone()
    }

    /// UTC instant the store accepted the record.
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
