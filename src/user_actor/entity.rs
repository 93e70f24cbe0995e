use crate::actor_framework::Entity;
use crate::domain::{UserPatch, UserRecord};

impl Entity for UserRecord {
    type Id = String;
    type Patch = UserPatch;

    fn id(&self) -> &String { &self.id }

    /// Applies a role and/or status change.
    ///
    /// # Errors
    /// Rejects a patch that carries neither field, and one that would leave
    /// the user without any role.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if patch.is_empty() {
            return Err("patch must set roles or status".to_string());
        }
        if let Some(roles) = patch.roles {
            if roles.is_empty() {
                return Err("roles must not be empty".to_string());
            }
            self.roles = roles;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Role, Status};
    use chrono::Utc;

    fn user() -> UserRecord {
        UserRecord::new("1", "Eleven", "Hopper", "eleven.hopper@northridge.edu", vec![Role::Teacher], Status::Active, Utc::now())
    }

    #[test]
    fn applies_roles_and_status() {
        let mut u = user();
        u.on_update(UserPatch::edit(Role::Admin, Status::Suspended)).unwrap();
        assert_eq!(u.roles, vec![Role::Admin, Role::Staff]);
        assert_eq!(u.status, Status::Suspended);
    }

    #[test]
    fn status_only_keeps_roles() {
        let mut u = user();
        u.on_update(UserPatch::status(Status::Archived)).unwrap();
        assert_eq!(u.roles, vec![Role::Teacher]);
        assert_eq!(u.status, Status::Archived);
    }

    #[test]
    fn rejects_empty_patch_and_empty_roles() {
        let mut u = user();
        let before = u.clone();
        assert!(u.on_update(UserPatch::default()).is_err());
        assert!(u.on_update(UserPatch { roles: Some(Vec::new()), status: None }).is_err());
        assert_eq!(u, before);
    }
}
