//! User data model.
//!
//! Users exist at the storage boundary only; no endpoint exposes them yet.

use std::fmt;

use uuid::Uuid;

/// Validation errors returned by the user constructors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserValidationError {
    /// Not a canonical UUID string.
    #[error("user id must be a valid UUID")]
    InvalidId,
    /// Empty or whitespace-only username.
    #[error("username must not be empty")]
    EmptyUsername,
}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from borrowed input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, UserValidationError> {
        let raw = id.as_ref();
        if raw.trim() != raw {
            return Err(UserValidationError::InvalidId);
        }
        Uuid::parse_str(raw)
            .map(Self)
            .map_err(|_| UserValidationError::InvalidId)
    }

    /// Generate a new random [`UserId`].
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Login handle. Not unique across users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Username(String);

impl Username {
    /// Validate and construct a [`Username`].
    pub fn new(username: impl Into<String>) -> Result<Self, UserValidationError> {
        let username = username.into();
        if username.trim().is_empty() {
            return Err(UserValidationError::EmptyUsername);
        }
        Ok(Self(username))
    }
}

impl AsRef<str> for Username {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Username {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Login handle.
    pub username: Username,
    /// Optional name shown to other users.
    pub display_name: Option<String>,
}

impl NewUser {
    /// Registration with no display name.
    pub fn new(username: Username) -> Self {
        Self {
            username,
            display_name: None,
        }
    }

    /// Attach a display name.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }
}

/// Stored user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    username: Username,
    display_name: Option<String>,
}

impl User {
    /// Assemble a stored user from its identifier and registration fields.
    pub fn new(id: UserId, fields: NewUser) -> Self {
        let NewUser {
            username,
            display_name,
        } = fields;
        Self {
            id,
            username,
            display_name,
        }
    }

    /// Identifier assigned by the store.
    pub fn id(&self) -> UserId {
        self.id
    }

    /// Login handle.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Display name, if one was given.
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }
}
