use serde::{Deserialize, Serialize};

use super::Role;

/// One point of the monthly registrations series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationsDatum {
    pub month: String,
    pub registrations: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsersByRoleDatum {
    pub role: Role,
    pub count: u32,
}
