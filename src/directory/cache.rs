use crate::domain::UserRecord;

/// Client-side copy of the full user list, in store order.
#[derive(Debug, Clone, Default)]
pub struct UserCache {
    users: Vec<UserRecord>,
}

impl UserCache {
    pub fn new(users: Vec<UserRecord>) -> Self {
        Self { users }
    }

    pub fn users(&self) -> &[UserRecord] {
        &self.users
    }

    pub fn get(&self, id: &str) -> Option<&UserRecord> {
        self.users.iter().find(|u| u.id == id)
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    /// Swaps the cached record with the same id for `updated`, leaving every
    /// other record and all positions alone. Returns false when the id is not
    /// cached.
    pub fn patch(&mut self, updated: UserRecord) -> bool {
        match self.users.iter_mut().find(|u| u.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => false,
        }
    }

    pub fn replace_all(&mut self, users: Vec<UserRecord>) {
        self.users = users;
    }
}
