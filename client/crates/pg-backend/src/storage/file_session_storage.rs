use crate::{BackendError, BackendResult, SessionStorage};

use pg_core::Session;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// JSON session file written with the temp-file + fsync + rename pattern,
/// so a crash mid-write never leaves a half-written session behind.
pub struct FileSessionStorage {
    path: PathBuf,
}

impl FileSessionStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames a corrupted file to `<name>.corrupted.<timestamp>`.
    fn backup_corrupted(&self) -> BackendResult<PathBuf> {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("session.json"));
        let backup_path = self
            .path
            .with_file_name(format!("{file_name}.corrupted.{timestamp}"));

        fs::rename(&self.path, &backup_path)
            .map_err(|e| BackendError::storage(self.path.clone(), e))?;

        warn!("Backed up corrupted session file to {backup_path:?}");
        Ok(backup_path)
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> BackendResult<Option<Session>> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session file at {:?}", self.path);
                return Ok(None);
            }
            Err(e) => return Err(BackendError::storage(self.path.clone(), e)),
        };

        match serde_json::from_str::<Session>(&contents) {
            Ok(session) => {
                info!("Restored session for user {}", session.user.id);
                Ok(Some(session))
            }
            Err(e) => {
                warn!("Session file corrupted at {:?}: {e}", self.path);
                self.backup_corrupted()?;
                Ok(None)
            }
        }
    }

    fn save(&self, session: &Session) -> BackendResult<()> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).map_err(|e| BackendError::storage(dir.to_path_buf(), e))?;
        }

        let temp_path = self
            .path
            .with_extension(format!("tmp.{}", std::process::id()));

        let json = serde_json::to_string_pretty(session)?;

        {
            let mut file = fs::File::create(&temp_path)
                .map_err(|e| BackendError::storage(temp_path.clone(), e))?;

            file.write_all(json.as_bytes())
                .map_err(|e| BackendError::storage(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| BackendError::storage(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            BackendError::storage(self.path.clone(), e)
        })?;

        debug!("Persisted session for user {}", session.user.id);
        Ok(())
    }

    fn clear(&self) -> BackendResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!("Removed session file {:?}", self.path);
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(BackendError::storage(self.path.clone(), e)),
        }
    }
}
