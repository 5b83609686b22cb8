//! Path management for contacts configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! <working dir>/                # base directory
//! ├── contacts.toml             # optional local configuration
//! ├── people.json               # primary record file (default)
//! ├── backup_people.json        # backup mirror (default)
//! └── log.txt                   # append-mode log (default)
//!
//! ~/.config/contacts/           # user config directory (dirs::config_dir)
//! └── config.toml               # used when no local contacts.toml exists
//! ```

use contacts_core::config::LoggingConfig;
use contacts_core::error::{ContactsError, Result};
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the base directory.
pub const LOCAL_CONFIG_FILE: &str = "contacts.toml";

/// Resolves every path the application touches against one base directory.
pub struct ContactsPaths {
    base_dir: PathBuf,
}

impl ContactsPaths {
    /// Creates a resolver rooted at `base_dir`, or at the current working
    /// directory when `None`.
    pub fn new(base_dir: Option<&Path>) -> Result<Self> {
        let base_dir = match base_dir {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().map_err(|e| {
                ContactsError::io(format!("Cannot determine working directory: {}", e))
            })?,
        };
        Ok(Self { base_dir })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `contacts.toml` in the base directory.
    pub fn local_config_file(&self) -> PathBuf {
        self.base_dir.join(LOCAL_CONFIG_FILE)
    }

    /// `<config_dir>/contacts/config.toml`, if the platform has a config dir.
    pub fn user_config_file() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("contacts").join("config.toml"))
    }

    /// Config file candidates in lookup order.
    pub fn config_candidates(&self) -> Vec<PathBuf> {
        let mut candidates = vec![self.local_config_file()];
        candidates.extend(Self::user_config_file());
        candidates
    }

    /// The first candidate that exists on disk.
    pub fn resolve_config_file(&self) -> Option<PathBuf> {
        self.config_candidates().into_iter().find(|p| p.is_file())
    }

    /// Log file path resolved against the base directory.
    pub fn log_file(&self, logging: &LoggingConfig) -> PathBuf {
        self.base_dir.join(&logging.file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_local_config_comes_first() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactsPaths::new(Some(temp_dir.path())).unwrap();
        let candidates = paths.config_candidates();
        assert_eq!(candidates[0], temp_dir.path().join("contacts.toml"));
    }

    #[test]
    fn test_resolve_prefers_existing_local_file() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactsPaths::new(Some(temp_dir.path())).unwrap();
        std::fs::write(paths.local_config_file(), "").unwrap();
        assert_eq!(paths.resolve_config_file(), Some(paths.local_config_file()));
    }

    #[test]
    fn test_log_file_is_relative_to_base() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ContactsPaths::new(Some(temp_dir.path())).unwrap();
        assert_eq!(
            paths.log_file(&LoggingConfig::default()),
            temp_dir.path().join("log.txt")
        );
    }
}
