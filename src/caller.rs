use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity on whose behalf a registry operation runs.
///
/// Authenticating the identity is the job of whatever hands out `Caller`
/// values. The registry only resolves the caller's current role and
/// ownership, so a caller never carries a role of its own.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Caller {
    pub user: Uuid,
}

impl Caller {
    pub fn new(user: Uuid) -> Caller {
        Caller { user }
    }
}

impl From<Uuid> for Caller {
    fn from(user: Uuid) -> Self {
        Caller { user }
    }
}

impl std::fmt::Display for Caller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.user)
    }
}
