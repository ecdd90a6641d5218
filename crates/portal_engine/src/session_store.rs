use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use portal_logging::{portal_info, portal_warn};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::wire::SessionGrant;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("io error on session file: {0}")]
    Io(#[from] io::Error),
    #[error("session file is not valid RON: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("could not encode session: {0}")]
    Encode(#[from] ron::Error),
}

/// The signed-in session, kept as a small RON file between runs.
#[derive(Debug, Clone)]
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Stored session, expired or not. `None` if nothing was saved.
    pub fn load(&self) -> Result<Option<SessionGrant>, SessionStoreError> {
        let content = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        Ok(Some(ron::from_str(&content)?))
    }

    /// Session usable at `now`. Unreadable or expired files count as signed out.
    pub fn load_active(&self, now: DateTime<Utc>) -> Option<SessionGrant> {
        match self.load() {
            Ok(Some(grant)) if grant.is_active_at(now) => Some(grant),
            Ok(Some(_)) => {
                portal_info!("Stored session in {:?} has expired", self.path);
                None
            }
            Ok(None) => None,
            Err(err) => {
                portal_warn!("Ignoring session file {:?}: {}", self.path, err);
                None
            }
        }
    }

    /// Writes through a temp file in the same directory, then renames over the target.
    pub fn save(&self, grant: &SessionGrant) -> Result<(), SessionStoreError> {
        let content = ron::ser::to_string_pretty(grant, ron::ser::PrettyConfig::new())?;
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&dir)?;

        let mut tmp = NamedTempFile::new_in(&dir)?;
        tmp.write_all(content.as_bytes())?;
        tmp.flush()?;
        tmp.as_file_mut().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        Ok(())
    }

    pub fn clear(&self) -> Result<(), SessionStoreError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}
