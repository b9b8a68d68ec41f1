use super::storage::SessionStore;
use crate::error::{Result, TicketDeskError};
use crate::models::Session;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::warn;

const SESSION_FILE: &str = "session.json";

/// Keeps the session in a single JSON file so it survives between CLI
/// invocations. Saves go through a temp file and a rename; clears remove
/// the file. Either way readers see the old session or the new one.
pub struct FilesystemSessionStore {
    path: PathBuf,
}

impl FilesystemSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<cache dir>/ticketdesk/session.json`
    pub fn default_path() -> Result<PathBuf> {
        let cache = dirs::cache_dir()
            .or_else(|| dirs::home_dir().map(|home| home.join(".cache")))
            .ok_or_else(|| TicketDeskError::Session("no cache directory available".to_string()))?;
        Ok(cache.join("ticketdesk").join(SESSION_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| SESSION_FILE.into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FilesystemSessionStore {
    fn read(&self) -> Session {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Session::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file unreadable, continuing anonymously");
                return Session::default();
            }
        };

        match serde_json::from_str(&content) {
            Ok(session) => session,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "session file corrupt, continuing anonymously");
                Session::default()
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = serde_json::to_string_pretty(session)?;
        let temp = self.temp_path();
        fs::write(&temp, content)?;
        fs::rename(&temp, &self.path)?;
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
