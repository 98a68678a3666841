//! Global user roles.
//!
//! The role set is closed at the application level but persisted as open
//! text, so a record carrying a role this build does not know about must
//! load as [`Role::Unknown`] (which holds no permissions) instead of failing.

use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    Dev,
    Pm,
    Cto,
    Lead,
    Designer,
    /// Fallback for role text this build does not recognize. Grants nothing.
    #[serde(other)]
    Unknown,
}

impl Role {
    /// The six assignable roles, in the order they were seeded.
    pub const ASSIGNABLE: [Role; 6] = [
        Role::Admin,
        Role::Dev,
        Role::Pm,
        Role::Cto,
        Role::Lead,
        Role::Designer,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Dev => "dev",
            Self::Pm => "pm",
            Self::Cto => "cto",
            Self::Lead => "lead",
            Self::Designer => "designer",
            Self::Unknown => "unknown",
        }
    }

    /// Lossy parse for values loaded from the store. Never fails: text that
    /// is not one of the six assignable roles becomes [`Role::Unknown`].
    pub fn from_stored(s: &str) -> Self {
        Self::from_str(s).unwrap_or(Self::Unknown)
    }
}

/// Strict parse, used when validating a role *assignment*.
impl FromStr for Role {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        match s {
            "admin" => Ok(Self::Admin),
            "dev" => Ok(Self::Dev),
            "pm" => Ok(Self::Pm),
            "cto" => Ok(Self::Cto),
            "lead" => Ok(Self::Lead),
            "designer" => Ok(Self::Designer),
            _ => Err(CoreError::InvalidRole {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            }),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
