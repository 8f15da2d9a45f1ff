//! Durable session storage: the bearer token and the user snapshot,
//! persisted as a JSON file and read back at startup to seed the gate.

use std::{fs, path::Path};

use api_types::user::User;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};

const DEFAULT_SESSION_PATH: &str = "config/session.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Handle to the session file. A missing file is simply "not logged in".
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: String,
}

impl SessionFile {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn load(&self) -> Result<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StoreError::Io(err)),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    pub fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = Path::new(&self.path).parent() {
            fs::create_dir_all(parent)?;
        }
        let payload = serde_json::to_string_pretty(session)?;
        fs::write(&self.path, payload)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(StoreError::Io(err)),
        }
    }
}

impl Default for SessionFile {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_PATH)
    }
}
