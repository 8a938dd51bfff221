//! Flat-file auth store: a single JSON object mapping email → user record.
//!
//! The whole file is read on every lookup and rewritten on every registration.
//! Writes are serialized through an async mutex so two registrations cannot
//! interleave their read-modify-write cycles.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed user file: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A registered user. The email is the map key, not a field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub last: String,
    pub password: String,
}

impl UserRecord {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first, self.last).trim().to_string()
    }
}

pub type UserMap = BTreeMap<String, UserRecord>;

pub struct UserStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl UserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads every user. A missing file is an empty store.
    pub async fn load(&self) -> Result<UserMap, UserStoreError> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(UserMap::new()),
            Err(source) => return Err(self.io_error(source)),
        };
        if raw.trim().is_empty() {
            return Ok(UserMap::new());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    async fn save(&self, users: &UserMap) -> Result<(), UserStoreError> {
        let body = serde_json::to_string_pretty(users)?;
        tokio::fs::write(&self.path, body)
            .await
            .map_err(|source| self.io_error(source))?;
        debug!("Saved {} users to {}", users.len(), self.path.display());
        Ok(())
    }

    /// Inserts or replaces the record stored under `email`.
    pub async fn register(&self, email: &str, record: UserRecord) -> Result<(), UserStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.load().await?;
        users.insert(email.to_string(), record);
        self.save(&users).await?;
        info!("Registered user {email}");
        Ok(())
    }

    /// Returns the user only when the password matches exactly.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        let users = self.load().await?;
        Ok(users.get(email).filter(|u| u.password == password).cloned())
    }

    pub async fn get(&self, email: &str) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.load().await?.remove(email))
    }

    fn io_error(&self, source: std::io::Error) -> UserStoreError {
        UserStoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}
