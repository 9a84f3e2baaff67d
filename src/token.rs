//! Token storage for the LMS client
//!
//! Access tokens are short-lived and read on every request, so they live
//! only in process memory and are gone once the client is dropped. Refresh
//! tokens must survive restarts so a user isn't forced to log in again on
//! every launch; they persist through a [`TokenStorage`] slot.

use std::path::PathBuf;
use std::sync::RwLock;

use tracing::warn;

/// A durable slot holding the refresh token as an opaque string.
///
/// Absence means "no session to resume". Writes are best-effort: the
/// original contract is browser local storage, which cannot fail, so
/// implementations log I/O problems instead of propagating them.
pub trait TokenStorage: Send + Sync {
    /// Read the stored refresh token, if any
    fn get(&self) -> Option<String>;

    /// Store the refresh token, or delete the slot when `None`
    fn set(&self, token: Option<&str>);
}

/// In-memory storage; the session does not survive the process.
#[derive(Debug, Default)]
pub struct MemoryTokenStorage {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn get(&self) -> Option<String> {
        self.token.read().unwrap().clone()
    }

    fn set(&self, token: Option<&str>) {
        *self.token.write().unwrap() = token.map(str::to_string);
    }
}

/// File-backed storage keeping the refresh token across restarts.
#[derive(Debug)]
pub struct FileTokenStorage {
    path: PathBuf,
}

impl FileTokenStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl TokenStorage for FileTokenStorage {
    fn get(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(contents) => {
                let token = contents.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(_) => None,
        }
    }

    fn set(&self, token: Option<&str>) {
        let result = match token {
            Some(token) => std::fs::write(&self.path, token),
            None => match std::fs::remove_file(&self.path) {
                Err(err) if err.kind() != std::io::ErrorKind::NotFound => Err(err),
                _ => Ok(()),
            },
        };

        if let Err(err) = result {
            warn!(path = %self.path.display(), %err, "failed to persist refresh token");
        }
    }
}

/// Holds the current token pair: access token in volatile memory, refresh
/// token behind the durable storage slot.
pub struct TokenStore {
    access: RwLock<Option<String>>,
    storage: Box<dyn TokenStorage>,
}

impl TokenStore {
    pub fn new(storage: Box<dyn TokenStorage>) -> Self {
        Self {
            access: RwLock::new(None),
            storage,
        }
    }

    /// The current access token, if one has been issued
    pub fn access_token(&self) -> Option<String> {
        self.access.read().unwrap().clone()
    }

    pub fn set_access(&self, token: Option<String>) {
        *self.access.write().unwrap() = token;
    }

    /// The stored refresh token, read from durable storage
    pub fn refresh_token(&self) -> Option<String> {
        self.storage.get()
    }

    pub fn set_refresh(&self, token: Option<&str>) {
        self.storage.set(token);
    }

    /// Null both tokens and delete the durable slot
    pub fn clear(&self) {
        self.set_access(None);
        self.set_refresh(None);
    }
}
