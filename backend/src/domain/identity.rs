//! Identity primitives consumed read-only from the external auth provider.
//!
//! The backend never authenticates credentials itself; it resolves an
//! externally authenticated user id into a [`Principal`] carrying the role
//! stored on the profile record.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validation errors for identity values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityValidationError {
    /// User id was missing or blank.
    EmptyUserId,
    /// User id was not a valid UUID.
    InvalidUserId,
    /// Role string was not one of the known roles.
    UnknownRole { value: String },
}

impl fmt::Display for IdentityValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyUserId => write!(f, "user id must not be empty"),
            Self::InvalidUserId => write!(f, "user id must be a valid UUID"),
            Self::UnknownRole { value } => {
                write!(f, "role must be customer, technician, or admin (got {value})")
            }
        }
    }
}

impl std::error::Error for IdentityValidationError {}

/// Stable user identifier stored as a UUID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Validate and construct a [`UserId`] from string input.
    pub fn new(id: impl AsRef<str>) -> Result<Self, IdentityValidationError> {
        let raw = id.as_ref();
        if raw.trim().is_empty() {
            return Err(IdentityValidationError::EmptyUserId);
        }
        let parsed = Uuid::parse_str(raw).map_err(|_| IdentityValidationError::InvalidUserId)?;
        Ok(Self(parsed))
    }

    /// Construct from an already parsed UUID.
    #[must_use]
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Access the underlying UUID.
    #[must_use]
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Role attribute attached to an authenticated principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Books appointments and browses portfolios.
    Customer,
    /// Service provider; the only role permitted to upload generative content.
    Technician,
    /// Back-office role.
    Admin,
}

impl Role {
    /// Stable string form used by the record store.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Technician => "technician",
            Self::Admin => "admin",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = IdentityValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "technician" => Ok(Self::Technician),
            "admin" => Ok(Self::Admin),
            other => Err(IdentityValidationError::UnknownRole {
                value: other.to_owned(),
            }),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An authenticated principal passed explicitly into domain operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    user_id: UserId,
    role: Role,
}

impl Principal {
    /// Build a principal from its parts.
    #[must_use]
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// The authenticated user id.
    #[must_use]
    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// The role attribute read from the profile record.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether this principal may run the generative content pipeline.
    #[must_use]
    pub fn is_technician(&self) -> bool {
        self.role == Role::Technician
    }
}
