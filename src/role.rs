use crate::error::RegistryError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Role {
    None,
    Admin,
    Teacher,
    Student,
}

impl From<Role> for u8 {
    fn from(role: Role) -> u8 {
        match role {
            Role::None => 0u8,
            Role::Admin => 1u8,
            Role::Teacher => 2u8,
            Role::Student => 3u8,
        }
    }
}

impl From<u8> for Role {
    fn from(value: u8) -> Self {
        match value {
            1 => Role::Admin,
            2 => Role::Teacher,
            3 => Role::Student,
            _ => Role::None,
        }
    }
}

impl Role {
    /// Parses a role name as accepted by user management operations.
    ///
    /// Only assignable roles are accepted, so `"None"` is rejected too.
    pub fn parse(value: impl AsRef<str>) -> Result<Role, RegistryError> {
        match value.as_ref() {
            "Admin" => Ok(Role::Admin),
            "Teacher" => Ok(Role::Teacher),
            "Student" => Ok(Role::Student),
            other => Err(RegistryError::InvalidRole(other.to_string())),
        }
    }

    /// Indicates whether an identity with this role is registered.
    pub fn is_registered(self) -> bool {
        self != Role::None
    }
}

impl std::default::Default for Role {
    fn default() -> Self {
        Role::None
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::None => write!(f, "None"),
            Role::Admin => write!(f, "Admin"),
            Role::Teacher => write!(f, "Teacher"),
            Role::Student => write!(f, "Student"),
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> String {
        role.to_string()
    }
}
