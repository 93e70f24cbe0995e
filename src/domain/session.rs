use serde::{Deserialize, Serialize};

/// Roles a person can sign in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionRole {
    Admin,
    Teacher,
    Staff,
}

/// The signed-in identity, persisted as `{ id, name, role }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: SessionRole,
}

impl SessionUser {
    /// Identity used when nothing is persisted.
    pub fn default_admin() -> Self {
        Self::preset(SessionRole::Admin)
    }

    /// Fixed identity behind each login button.
    pub fn preset(role: SessionRole) -> Self {
        let (id, name) = match role {
            SessionRole::Admin => ("u-admin", "G. Milla"),
            SessionRole::Teacher => ("u-teacher", "Robin Buckley"),
            SessionRole::Staff => ("u-staff", "Sam Calder"),
        };
        Self {
            id: id.to_string(),
            name: name.to_string(),
            role,
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == SessionRole::Admin
    }
}
