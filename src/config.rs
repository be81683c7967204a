//! Buffer configuration, read from `setting.json` under the cache directory.

use crate::error::Result;
use crate::models::DEFAULT_UNDO_LIMIT;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SETTINGS_DIR: &str = ".ztext";
const SETTINGS_FILE: &str = "setting.json";

/// Characters that form a one-character word for `w`/`b`/`e` motions.
pub const DEFAULT_PUNCTUATION: &str = "()[]{}<>'\"`.,;:!?=+-*/\\|&^%$#@~";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BufferConfig {
    pub undo_limit: usize,
    pub incremental_parse: bool,
    pub punctuation: String,
    pub highlight_on_change: bool,
}

impl Default for BufferConfig {
    fn default() -> Self {
        Self {
            undo_limit: DEFAULT_UNDO_LIMIT,
            incremental_parse: true,
            punctuation: DEFAULT_PUNCTUATION.to_string(),
            highlight_on_change: true,
        }
    }
}

impl BufferConfig {
    pub fn from_json_str(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    /// Missing file yields defaults; unreadable or malformed files are errors.
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(data) => Self::from_json_str(&data),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn settings_path() -> Option<PathBuf> {
        get_cache_dir().map(|dir| dir.join(SETTINGS_DIR).join(SETTINGS_FILE))
    }

    pub fn is_punctuation(&self, c: char) -> bool {
        self.punctuation.contains(c)
    }
}

fn get_cache_dir() -> Option<PathBuf> {
    if let Ok(xdg) = std::env::var("XDG_CACHE_HOME") {
        if !xdg.is_empty() {
            return Some(PathBuf::from(xdg));
        }
    }
    std::env::var("HOME")
        .ok()
        .map(|home| PathBuf::from(home).join(".cache"))
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
