//! JSON snapshot file for `TournamentData`.

use crate::models::TournamentError;
use crate::store::TournamentData;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// File holding the latest committed state.
#[derive(Clone, Debug)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the snapshot. A missing file is not an error (fresh tournament).
    pub fn load(&self) -> Result<Option<TournamentData>, TournamentError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| storage_error(&self.path, e))
    }

    /// Write the snapshot. Writes a sibling temp file first, then renames it over the old one.
    pub fn save(&self, data: &TournamentData) -> Result<(), TournamentError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir).map_err(|e| storage_error(dir, e))?;
        }
        let json = serde_json::to_vec_pretty(data).map_err(|e| storage_error(&self.path, e))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| storage_error(&tmp, e))?;
        fs::rename(&tmp, &self.path).map_err(|e| storage_error(&self.path, e))?;
        log::debug!("Saved tournament snapshot to {}", self.path.display());
        Ok(())
    }
}

fn storage_error(path: &Path, e: impl std::fmt::Display) -> TournamentError {
    TournamentError::Storage(format!("{}: {}", path.display(), e))
}
