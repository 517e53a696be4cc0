use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use stargazer_core::{Repo, StarredSet};
use stargazer_logging::{sg_info, sg_warn};

use crate::persist::write_atomically;
use crate::StorageError;

/// The single storage key holding the whole starred set.
pub const STARRED_KEY: &str = "starred_repos";

/// Raw key-value storage for the serialized starred set.
pub trait StarredStorage: Send {
    /// Returns `Ok(None)` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>, StorageError>;
    fn write(&self, contents: &str) -> Result<(), StorageError>;
}

/// Stores the set as `{dir}/starred_repos.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STARRED_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl StarredStorage for FileStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(StorageError::Read(err)),
        }
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        write_atomically(&self.path, contents).map_err(StorageError::Write)
    }
}

/// In-process storage; each instance is independent.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    contents: Mutex<Option<String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: Mutex::new(Some(contents.into())),
        }
    }

    pub fn contents(&self) -> Option<String> {
        self.contents.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StarredStorage for MemoryStorage {
    fn read(&self) -> Result<Option<String>, StorageError> {
        let guard = self
            .contents
            .lock()
            .map_err(|_| StorageError::Read(io::Error::other("storage lock poisoned")))?;
        Ok(guard.clone())
    }

    fn write(&self, contents: &str) -> Result<(), StorageError> {
        let mut guard = self
            .contents
            .lock()
            .map_err(|_| StorageError::Write(io::Error::other("storage lock poisoned")))?;
        *guard = Some(contents.to_string());
        Ok(())
    }
}

/// Binds the starred set to its storage: load once, overwrite on every change.
pub struct StarredStore<S> {
    storage: S,
}

impl<S: StarredStorage> StarredStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Reads the persisted set. Unreadable or malformed storage yields an empty set.
    pub fn load(&self) -> StarredSet {
        match self.try_load() {
            Ok(set) => {
                sg_info!("Loaded {} starred repositories", set.len());
                set
            }
            Err(err) => {
                sg_warn!("{}; starting with an empty starred set", err);
                StarredSet::new()
            }
        }
    }

    fn try_load(&self) -> Result<StarredSet, StorageError> {
        let Some(raw) = self.storage.read()? else {
            return Ok(StarredSet::new());
        };
        if raw.trim().is_empty() {
            return Ok(StarredSet::new());
        }
        let repos: Vec<Repo> = serde_json::from_str(&raw).map_err(StorageError::Parse)?;
        Ok(StarredSet::from_repos(repos))
    }

    /// Overwrites storage with the whole set, in insertion order.
    pub fn save(&self, set: &StarredSet) -> Result<(), StorageError> {
        self.save_repos(set.repos())
    }

    pub fn save_repos(&self, repos: &[Repo]) -> Result<(), StorageError> {
        let contents = serde_json::to_string(repos).map_err(StorageError::Serialize)?;
        self.storage.write(&contents)
    }

    /// Toggles `repo` in `set` and persists the result.
    pub fn toggle(&self, set: &StarredSet, repo: &Repo) -> Result<StarredSet, StorageError> {
        let next = set.toggle(repo);
        self.save(&next)?;
        Ok(next)
    }
}
