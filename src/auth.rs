//! Auth Context
//!
//! The bearer token issued by the API lives in a [`TokenStore`] (browser
//! `localStorage`, a file for the CLI, memory for tests). [`AuthContext`] is
//! the only way the rest of the crate reads or writes it: one read path
//! ([`AuthContext::bearer`]) and one write path
//! ([`AuthContext::sign_in`] / [`AuthContext::sign_out`]).

use std::fmt;
use std::sync::{Arc, RwLock};
use thiserror::Error;

/// Storage key (browser) under which the token is kept
pub const TOKEN_KEY: &str = "token";

/// Errors while persisting the token
#[derive(Error, Debug)]
pub enum TokenStoreError {
    /// Backing storage cannot be reached
    #[error("Token storage unavailable: {0}")]
    Unavailable(String),

    /// Backing storage refused the write
    #[error("Failed to persist token: {0}")]
    Write(String),
}

/// Persistent key-value slot holding the bearer token
pub trait TokenStore: Send + Sync {
    /// Stored token, if any
    fn load(&self) -> Option<String>;

    /// Replace the stored token
    fn save(&self, token: &str) -> Result<(), TokenStoreError>;

    /// Remove the stored token
    fn clear(&self) -> Result<(), TokenStoreError>;
}

/// Process-local token store
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self) -> Option<String> {
        self.token.read().ok()?.clone()
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        let mut slot = self
            .token
            .write()
            .map_err(|e| TokenStoreError::Write(e.to_string()))?;
        *slot = Some(token.to_string());
        Ok(())
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        let mut slot = self
            .token
            .write()
            .map_err(|e| TokenStoreError::Write(e.to_string()))?;
        *slot = None;
        Ok(())
    }
}

/// Shared handle to the token store, injected into every API client
#[derive(Clone)]
pub struct AuthContext {
    store: Arc<dyn TokenStore>,
}

impl AuthContext {
    pub fn new(store: impl TokenStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    /// Context backed by an empty in-memory store
    pub fn anonymous() -> Self {
        Self::new(MemoryTokenStore::default())
    }

    /// Current token; blank values count as absent
    pub fn token(&self) -> Option<String> {
        self.store
            .load()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    }

    /// `Authorization` header value, when a token is present
    pub fn bearer(&self) -> Option<String> {
        self.token().map(|token| format!("Bearer {}", token))
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }

    /// Store a freshly issued token
    pub fn sign_in(&self, token: &str) -> Result<(), TokenStoreError> {
        self.store.save(token.trim())?;
        tracing::info!("Stored API token");
        Ok(())
    }

    /// Forget the stored token
    pub fn sign_out(&self) -> Result<(), TokenStoreError> {
        self.store.clear()?;
        tracing::info!("Cleared API token");
        Ok(())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::anonymous()
    }
}

impl fmt::Debug for AuthContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthContext")
            .field("signed_in", &self.is_signed_in())
            .finish()
    }
}

/// Token kept in a plain file (CLI)
#[cfg(feature = "native")]
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: std::path::PathBuf,
}

#[cfg(feature = "native")]
impl FileTokenStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(feature = "native")]
impl TokenStore for FileTokenStore {
    fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => Some(content.trim().to_string()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!("Failed to read token file {:?}: {}", self.path, e);
                None
            }
        }
    }

    fn save(&self, token: &str) -> Result<(), TokenStoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| TokenStoreError::Unavailable(format!("{:?}: {}", parent, e)))?;
            }
        }
        std::fs::write(&self.path, token)
            .map_err(|e| TokenStoreError::Write(format!("{:?}: {}", self.path, e)))
    }

    fn clear(&self) -> Result<(), TokenStoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(TokenStoreError::Write(format!("{:?}: {}", self.path, e))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anonymous_has_no_bearer() {
        let auth = AuthContext::anonymous();
        assert_eq!(auth.token(), None);
        assert_eq!(auth.bearer(), None);
        assert!(!auth.is_signed_in());
    }

    #[test]
    fn test_bearer_format() {
        let auth = AuthContext::new(MemoryTokenStore::with_token("abc.def.ghi"));
        assert_eq!(auth.bearer().as_deref(), Some("Bearer abc.def.ghi"));
    }

    #[test]
    fn test_blank_token_counts_as_absent() {
        let auth = AuthContext::new(MemoryTokenStore::with_token("   "));
        assert_eq!(auth.bearer(), None);
    }

    #[test]
    fn test_sign_in_and_out_share_the_store() {
        let auth = AuthContext::anonymous();
        let other_handle = auth.clone();

        auth.sign_in(" t0ken\n").unwrap();
        assert_eq!(other_handle.bearer().as_deref(), Some("Bearer t0ken"));

        other_handle.sign_out().unwrap();
        assert!(!auth.is_signed_in());
    }

    #[test]
    fn test_debug_hides_token() {
        let auth = AuthContext::new(MemoryTokenStore::with_token("secret"));
        let printed = format!("{:?}", auth);
        assert!(!printed.contains("secret"));
        assert!(printed.contains("signed_in: true"));
    }

    #[cfg(feature = "native")]
    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileTokenStore::new(dir.path().join("nested").join("token"));

        assert_eq!(store.load(), None);
        store.save("file-token").unwrap();
        assert_eq!(store.load().as_deref(), Some("file-token"));

        let auth = AuthContext::new(store.clone());
        assert_eq!(auth.bearer().as_deref(), Some("Bearer file-token"));

        store.clear().unwrap();
        assert_eq!(store.load(), None);
        // clearing twice is fine
        store.clear().unwrap();
    }
}
