//! User roles for access control
//!
//! Three exclusive roles gate catalog administration. Staff can browse,
//! borrow, and return; Manager and Admin can also mutate the catalog.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Access-control role assigned to every user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Admin,
    Manager,
    #[default]
    Staff,
}

impl Role {
    /// Whether this role may create, edit, retire, or purge catalog records
    #[inline]
    pub fn can_manage_catalog(&self) -> bool {
        matches!(self, Self::Admin | Self::Manager)
    }

    /// Whether this role may administer users
    #[inline]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Database / wire representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Staff => "STAFF",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing a Role from string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for Role {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ADMIN" => Ok(Self::Admin),
            "MANAGER" => Ok(Self::Manager),
            "STAFF" => Ok(Self::Staff),
            other => Err(RoleParseError(other.to_string())),
        }
    }
}
