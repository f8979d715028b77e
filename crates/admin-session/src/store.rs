//! Token persistence.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::{SessionError, TokenKind};

/// Where session tokens live between runs.
pub trait TokenStore {
    /// Read the token stored for `kind`.
    fn load(&self, kind: TokenKind) -> Result<Option<String>, SessionError>;

    /// Store a token for `kind`, replacing any previous one.
    fn save(&mut self, kind: TokenKind, value: &str) -> Result<(), SessionError>;

    /// Remove every stored session artifact.
    fn clear_all(&mut self) -> Result<(), SessionError>;
}

/// In-process store, used in tests and short-lived tools.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStore {
    entries: BTreeMap<String, String>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl TokenStore for MemoryTokenStore {
    fn load(&self, kind: TokenKind) -> Result<Option<String>, SessionError> {
        Ok(self.entries.get(kind.storage_key()).cloned())
    }

    fn save(&mut self, kind: TokenKind, value: &str) -> Result<(), SessionError> {
        self.entries
            .insert(kind.storage_key().to_string(), value.to_string());
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), SessionError> {
        self.entries.clear();
        Ok(())
    }
}

/// JSON file keyed by storage key, e.g. `{"adminToken": "..."}`.
///
/// A missing file is an empty store. Keys that are not session token keys
/// are ignored and dropped on the next write. Clearing deletes the file.
#[derive(Debug, Clone)]
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<BTreeMap<String, String>, SessionError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        let mut entries: BTreeMap<String, String> = serde_json::from_str(&content)?;
        entries.retain(|key, _| {
            let known = TokenKind::from_storage_key(key).is_some();
            if !known {
                tracing::warn!(
                    key = %key,
                    path = %self.path.display(),
                    "ignoring unknown session key"
                );
            }
            known
        });
        Ok(entries)
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> Result<(), SessionError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?)?;
        Ok(())
    }
}

impl TokenStore for FileTokenStore {
    fn load(&self, kind: TokenKind) -> Result<Option<String>, SessionError> {
        Ok(self.read()?.remove(kind.storage_key()))
    }

    fn save(&mut self, kind: TokenKind, value: &str) -> Result<(), SessionError> {
        let mut entries = self.read()?;
        entries.insert(kind.storage_key().to_string(), value.to_string());
        self.write(&entries)
    }

    fn clear_all(&mut self) -> Result<(), SessionError> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }
}
