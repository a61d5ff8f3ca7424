//! User entity <-> model mapper

use stockroom_core::entities::User;
use stockroom_core::value_objects::{Role, Snowflake};

use crate::models::UserModel;

impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: Snowflake::new(model.id),
            username: model.username,
            email: model.email,
            // The CHECK constraint on the column keeps values in range
            role: model.role.parse().unwrap_or_default(),
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
