//! Durable offset cursor: one decimal value in a text file, overwritten on
//! every save.

use myna_core::error::MynaError;
use std::path::PathBuf;

pub struct OffsetStore {
    path: PathBuf,
}

impl OffsetStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Read the persisted cursor. A missing or empty file is a first run,
    /// not an error; unparsable content is.
    pub fn load(&self) -> Result<Option<i64>, MynaError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&self.path).map_err(|e| {
            MynaError::OffsetStore(format!("failed to read {}: {e}", self.path.display()))
        })?;

        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Ok(None);
        }

        let offset = trimmed.parse::<i64>().map_err(|e| {
            MynaError::OffsetStore(format!("corrupt offset file {}: {e}", self.path.display()))
        })?;
        Ok(Some(offset))
    }

    /// Overwrite the cursor. The write completes before this returns, so the
    /// value is on disk before the next poll goes out.
    pub fn save(&self, offset: i64) -> Result<(), MynaError> {
        std::fs::write(&self.path, format!("{offset}\n")).map_err(|e| {
            MynaError::OffsetStore(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}
