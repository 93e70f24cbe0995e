use tracing::{info, warn};

use crate::domain::{SessionRole, SessionUser};

use super::store::SessionStore;
use super::SessionError;

/// Storage key of the persisted session marker.
pub const SESSION_KEY: &str = "school-portal-auth";

/// Who is signed in, created once at the composition root and handed to
/// whatever needs it.
pub struct SessionContext<S> {
    store: S,
    user: Option<SessionUser>,
}

impl<S: SessionStore> SessionContext<S> {
    /// Reads the persisted marker. A missing or unreadable marker signs in
    /// the default admin.
    pub fn load(store: S) -> Result<Self, SessionError> {
        let user = match store.get(SESSION_KEY)? {
            Some(raw) => match serde_json::from_str::<SessionUser>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    warn!(error = %e, "Ignoring malformed session marker");
                    SessionUser::default_admin()
                }
            },
            None => SessionUser::default_admin(),
        };
        info!(user_id = %user.id, role = ?user.role, "Session loaded");
        Ok(Self {
            store,
            user: Some(user),
        })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.user.is_some()
    }

    /// Signs in as the preset identity for `role` and persists it. The
    /// identity only changes once the marker is stored.
    pub fn login_as(&mut self, role: SessionRole) -> Result<&SessionUser, SessionError> {
        let user = SessionUser::preset(role);
        let raw = serde_json::to_string(&user)?;
        self.store.set(SESSION_KEY, &raw)?;
        info!(user_id = %user.id, "Signed in");
        Ok(self.user.insert(user))
    }

    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.store.remove(SESSION_KEY)?;
        info!("Signed out");
        self.user = None;
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::tests::BrokenStore;
    use crate::session::{LenientStore, MemorySessionStore};

    #[test]
    fn empty_store_defaults_to_admin() {
        let ctx = SessionContext::load(MemorySessionStore::new()).unwrap();
        assert_eq!(ctx.user(), Some(&SessionUser::default_admin()));
        assert_eq!(ctx.user().unwrap().name, "G. Milla");
    }

    #[test]
    fn persisted_marker_is_restored() {
        let store = MemorySessionStore::new();
        store.set(SESSION_KEY, r#"{"id":"u-teacher","name":"Robin Buckley","role":"Teacher"}"#).unwrap();
        let ctx = SessionContext::load(store).unwrap();
        assert_eq!(ctx.user().unwrap().role, SessionRole::Teacher);
    }

    #[test]
    fn malformed_marker_defaults_to_admin() {
        let store = MemorySessionStore::new();
        store.set(SESSION_KEY, "{not json").unwrap();
        let ctx = SessionContext::load(store).unwrap();
        assert!(ctx.user().unwrap().is_admin());
    }

    #[test]
    fn login_and_logout_update_the_store() {
        let mut ctx = SessionContext::load(MemorySessionStore::new()).unwrap();

        let user = ctx.login_as(SessionRole::Staff).unwrap().clone();
        assert_eq!(user, SessionUser::preset(SessionRole::Staff));
        let raw = ctx.store().get(SESSION_KEY).unwrap().unwrap();
        assert_eq!(serde_json::from_str::<SessionUser>(&raw).unwrap(), user);

        ctx.logout().unwrap();
        assert!(!ctx.is_signed_in());
        assert_eq!(ctx.store().get(SESSION_KEY).unwrap(), None);
    }

    #[test]
    fn broken_storage_is_not_fatal_behind_lenient_store() {
        let mut ctx = SessionContext::load(LenientStore::new(BrokenStore)).unwrap();
        assert!(ctx.user().unwrap().is_admin());

        ctx.login_as(SessionRole::Teacher).unwrap();
        assert_eq!(ctx.user().unwrap().name, "Robin Buckley");

        ctx.logout().unwrap();
        assert!(ctx.user().is_none());
    }

    #[test]
    fn strict_store_surfaces_failures() {
        assert!(SessionContext::load(BrokenStore).is_err());
    }

    /// Reads succeed, writes fail.
    struct ReadOnlyStore;

    impl SessionStore for ReadOnlyStore {
        fn get(&self, _key: &str) -> Result<Option<String>, SessionError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), SessionError> {
            Err(SessionError::Unavailable("read-only".into()))
        }

        fn remove(&self, _key: &str) -> Result<(), SessionError> {
            Err(SessionError::Unavailable("read-only".into()))
        }
    }

    #[test]
    fn failed_write_keeps_previous_identity() {
        let mut ctx = SessionContext::load(ReadOnlyStore).unwrap();

        assert!(ctx.login_as(SessionRole::Teacher).is_err());
        assert_eq!(ctx.user(), Some(&SessionUser::default_admin()));

        assert!(ctx.logout().is_err());
        assert!(ctx.is_signed_in());
    }
}
