use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::role::Role;

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub role: Role,
}

impl User {
    pub fn new(id: Uuid, name: impl ToString, role: Role) -> User {
        tracing::debug!("Creating user {} with role {}", id, role);

        User {
            id,
            name: name.to_string(),
            role,
        }
    }
}
