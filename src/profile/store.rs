//! Profile repositories
//!
//! `ProfileStore` is the seam between the progression session and whatever
//! persistence is available.

use std::collections::HashMap;
use std::io;
use std::path::PathBuf;

use parking_lot::Mutex;
use thiserror::Error;

use super::model::UserProfile;
use super::storage::LocalStorage;
use super::user_id::UserId;

/// Storage record name of the progression profile
pub const PROFILE_RECORD: &str = "profile";

/// Persistence errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Parse error in {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Invalid user id {0:?}")]
    InvalidUserId(String),
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
}

/// Typed repository for per-user profiles
pub trait ProfileStore: Send {
    /// Stored profile for `user`, `None` if there is none yet
    fn load(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError>;

    /// Overwrite the stored profile for `user`
    fn save(&self, user: &UserId, profile: &UserProfile) -> Result<(), StoreError>;
}

/// Profiles stored as `user_<id>_profile.json`
#[derive(Debug, Clone)]
pub struct JsonProfileStore {
    storage: LocalStorage,
}

impl JsonProfileStore {
    pub fn new(storage: LocalStorage) -> Self {
        Self { storage }
    }

    pub fn storage(&self) -> &LocalStorage {
        &self.storage
    }
}

impl ProfileStore for JsonProfileStore {
    fn load(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError> {
        self.storage.load(user, PROFILE_RECORD)
    }

    fn save(&self, user: &UserId, profile: &UserProfile) -> Result<(), StoreError> {
        self.storage.save(user, PROFILE_RECORD, profile)
    }
}

/// Volatile store, used for guest sessions and tests
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored profiles
    pub fn len(&self) -> usize {
        self.profiles.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.lock().is_empty()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError> {
        Ok(self.profiles.lock().get(user).cloned())
    }

    fn save(&self, user: &UserId, profile: &UserProfile) -> Result<(), StoreError> {
        self.profiles.lock().insert(user.clone(), profile.clone());
        Ok(())
    }
}

impl<S: ProfileStore + Sync + ?Sized> ProfileStore for std::sync::Arc<S> {
    fn load(&self, user: &UserId) -> Result<Option<UserProfile>, StoreError> {
        (**self).load(user)
    }

    fn save(&self, user: &UserId, profile: &UserProfile) -> Result<(), StoreError> {
        (**self).save(user, profile)
    }
}
