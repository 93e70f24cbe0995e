use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::SessionError;

/// Key/value persistence port behind the session context.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError>;
    fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    fn remove(&self, key: &str) -> Result<(), SessionError>;
}

/// Process-local store, mainly for tests and throwaway sessions.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        let entries = self.entries.lock().map_err(|_| SessionError::Unavailable("store lock poisoned".into()))?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Unavailable("store lock poisoned".into()))?;
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        let mut entries = self.entries.lock().map_err(|_| SessionError::Unavailable("store lock poisoned".into()))?;
        entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key under a directory.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
}

impl FileSessionStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// Wraps a store so that storage failures never reach the caller: failed
/// reads look like a missing key, failed writes and removes are dropped.
#[derive(Debug, Clone)]
pub struct LenientStore<S> {
    inner: S,
}

impl<S: SessionStore> LenientStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

impl<S: SessionStore> SessionStore for LenientStore<S> {
    fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        match self.inner.get(key) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(key, error = %e, "Session read failed, treating as absent");
                Ok(None)
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        if let Err(e) = self.inner.set(key, value) {
            warn!(key, error = %e, "Session write failed, ignoring");
        }
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SessionError> {
        if let Err(e) = self.inner.remove(key) {
            warn!(key, error = %e, "Session remove failed, ignoring");
        }
        Ok(())
    }
}
