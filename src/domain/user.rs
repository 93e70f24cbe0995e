use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role tag carried by a user. A user may hold several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Role {
    Student,
    Teacher,
    Guardian,
    Staff,
    Admin,
}

impl Role {
    /// Canonical ordering used by pickers and analytics.
    pub const ALL: [Role; 5] = [Role::Student, Role::Teacher, Role::Guardian, Role::Staff, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Guardian => "Guardian",
            Role::Staff => "Staff",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Lifecycle tag of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Active,
    Invited,
    Suspended,
    Archived,
}

impl Status {
    pub const ALL: [Status; 4] = [Status::Active, Status::Invited, Status::Suspended, Status::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Active => "Active",
            Status::Invited => "Invited",
            Status::Suspended => "Suspended",
            Status::Archived => "Archived",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pronouns {
    #[serde(rename = "she/her")]
    SheHer,
    #[serde(rename = "he/him")]
    HeHim,
    #[serde(rename = "they/them")]
    TheyThem,
    #[serde(rename = "prefer not to say")]
    Unspecified,
}

impl Pronouns {
    pub const ALL: [Pronouns; 4] = [Pronouns::SheHer, Pronouns::HeHim, Pronouns::TheyThem, Pronouns::Unspecified];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Campus {
    North,
    South,
}

/// A directory entry as served by `GET /api/users`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub pronouns: Pronouns,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub last_login_at: Option<DateTime<Utc>>,
    pub roles: Vec<Role>,
    pub status: Status,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homeroom: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campus: Option<Campus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl UserRecord {
    /// Creates a record with the required fields set and no role-specific extras.
    pub fn new(
        id: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        email: impl Into<String>,
        roles: Vec<Role>,
        status: Status,
        registered_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            pronouns: Pronouns::Unspecified,
            email: email.into(),
            registered_at,
            last_login_at: None,
            roles,
            status,
            grade: None,
            homeroom: None,
            department: None,
            campus: None,
            phone: None,
            notes: None,
        }
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Roles joined for display and sorting, e.g. `"Admin, Staff"`.
    pub fn roles_label(&self) -> String {
        self.roles.iter().map(Role::as_str).collect::<Vec<_>>().join(", ")
    }
}

/// Partial update accepted by `PATCH /api/users/:id`.
///
/// Also the payload a bulk mutation applies to every selected id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub roles: Option<Vec<Role>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
}

impl UserPatch {
    /// Role assignment payload. Admin always travels with Staff.
    pub fn role(role: Role) -> Self {
        Self {
            roles: Some(roles_for(role)),
            status: None,
        }
    }

    pub fn status(status: Status) -> Self {
        Self {
            roles: None,
            status: Some(status),
        }
    }

    /// Payload produced by the single-user edit form, which saves both fields.
    pub fn edit(role: Role, status: Status) -> Self {
        Self {
            roles: Some(roles_for(role)),
            status: Some(status),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_none() && self.status.is_none()
    }
}

fn roles_for(role: Role) -> Vec<Role> {
    match role {
        Role::Admin => vec![Role::Admin, Role::Staff],
        other => vec![other],
    }
}
