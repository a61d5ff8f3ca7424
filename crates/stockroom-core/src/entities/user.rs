//! User entity - an authenticated account with an access-control role

use chrono::{DateTime, Utc};

use crate::value_objects::{Role, Snowflake};

/// Account known to the inventory service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String, email: String, role: Role) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            email,
            role,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this user may mutate catalog records
    #[inline]
    pub fn can_manage_catalog(&self) -> bool {
        self.role.can_manage_catalog()
    }
}
