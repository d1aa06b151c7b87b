//! Locally persisted sign-in session
//!
//! The API has no tokens; a successful login returns the account profile
//! and the client remembers it at `~/.bookbuddy/session.toml` until logout.
//! Admin-only actions are gated on the stored `is_admin` flag (the server
//! still enforces its own checks).

use crate::api::AccountProfile;
use crate::config::Config;
use crate::errors::{ClientError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// A stored sign-in session
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub account_id: i64,
    pub username: String,
    #[serde(default)]
    pub is_admin: bool,
}

impl From<AccountProfile> for Session {
    fn from(profile: AccountProfile) -> Self {
        Session {
            account_id: profile.account_id,
            username: profile.username,
            is_admin: profile.is_admin,
        }
    }
}

impl Session {
    /// Load the stored session, if any
    pub fn load() -> Result<Option<Self>> {
        Self::load_from(Self::session_path()?)
    }

    pub fn load_from(path: PathBuf) -> Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = fs::read_to_string(&path)?;
        let session = toml::from_str(&contents)
            .map_err(|e| ClientError::Config(format!("Failed to parse session file: {}", e)))?;
        Ok(Some(session))
    }

    /// Persist this session
    pub fn save(&self) -> Result<()> {
        self.save_to(Self::session_path()?)
    }

    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ClientError::Config(format!("Failed to serialize session: {}", e)))?;
        fs::write(&path, toml_string)?;
        Ok(())
    }

    /// Delete the stored session (sign out)
    pub fn clear() -> Result<()> {
        let path = Self::session_path()?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Load the stored session or fail with [`ClientError::NotSignedIn`]
    pub fn require() -> Result<Self> {
        Session::load()?.ok_or(ClientError::NotSignedIn)
    }

    /// Load the stored session and require the admin flag
    pub fn require_admin() -> Result<Self> {
        let session = Self::require()?;
        if !session.is_admin {
            return Err(ClientError::NotAdmin);
        }
        Ok(session)
    }

    fn session_path() -> Result<PathBuf> {
        Ok(Config::data_dir()?.join("session.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample() -> Session {
        Session {
            account_id: 42,
            username: "bookworm".to_string(),
            is_admin: false,
        }
    }

    #[test]
    fn test_session_round_trip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("session.toml");

        sample().save_to(path.clone()).unwrap();
        let loaded = Session::load_from(path).unwrap();
        assert_eq!(loaded, Some(sample()));
    }

    #[test]
    fn test_missing_session_is_none() {
        let temp = TempDir::new().unwrap();
        let loaded = Session::load_from(temp.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_session_from_profile() {
        let profile = AccountProfile {
            account_id: 7,
            username: "admin1".to_string(),
            is_admin: true,
        };
        let session = Session::from(profile);
        assert_eq!(session.account_id, 7);
        assert!(session.is_admin);
    }
}
