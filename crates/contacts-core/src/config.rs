//! Application configuration model.
//!
//! The on-disk form is `contacts.toml`:
//!
//! ```toml
//! [storage]
//! primary_file = "people.json"
//! backup_file = "backup_people.json"
//! load_policy = "strict"
//!
//! [logging]
//! file = "log.txt"
//! level = "info"
//! ```
//!
//! Every key is optional; missing keys take the defaults shown above.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ContactsError, Result};

/// How a store reacts when nothing usable can be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadPolicy {
    /// Propagate `PrimaryUnreadable`, `BackupUnreadable` or `BackupCorrupted`.
    #[default]
    Strict,
    /// Substitute an empty collection for every failure.
    Lenient,
}

impl LoadPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoadPolicy::Strict => "strict",
            LoadPolicy::Lenient => "lenient",
        }
    }
}

/// Root of `contacts.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ContactsConfig {
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

/// Record store settings.
///
/// These are read once at startup. A store takes its `load_policy` when it
/// is constructed and keeps it for its whole life; the policy cannot be
/// switched while a session is running.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Primary record file, relative to the working directory unless absolute.
    pub primary_file: PathBuf,
    /// Bare file name of the backup mirror; lives next to the primary.
    pub backup_file: String,
    /// Fixed per store instance at construction.
    pub load_policy: LoadPolicy,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            primary_file: PathBuf::from("people.json"),
            backup_file: "backup_people.json".to_string(),
            load_policy: LoadPolicy::Strict,
        }
    }
}

impl StorageConfig {
    /// Primary file path resolved against `base_dir` when relative.
    pub fn primary_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.primary_file)
    }

    /// Backup file path: always a sibling of the primary.
    pub fn backup_path(&self, base_dir: &Path) -> PathBuf {
        let primary = self.primary_path(base_dir);
        match primary.parent() {
            Some(parent) => parent.join(&self.backup_file),
            None => PathBuf::from(&self.backup_file),
        }
    }

    /// Checks the settings a store cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.primary_file.file_name().is_none() {
            return Err(ContactsError::config(format!(
                "storage.primary_file '{}' does not name a file",
                self.primary_file.display()
            )));
        }

        let backup = Path::new(&self.backup_file);
        if self.backup_file.is_empty() || backup.components().count() != 1 || backup.file_name().is_none() {
            return Err(ContactsError::config(format!(
                "storage.backup_file '{}' must be a bare file name",
                self.backup_file
            )));
        }

        if self.primary_file.file_name() == backup.file_name() {
            return Err(ContactsError::config(
                "storage.backup_file must differ from storage.primary_file",
            ));
        }

        Ok(())
    }
}

/// Log output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append-mode log file, relative to the working directory unless absolute.
    pub file: PathBuf,
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file: PathBuf::from("log.txt"),
            level: "info".to_string(),
        }
    }
}

impl ContactsConfig {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ContactsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.storage.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ContactsConfig::default();
        assert_eq!(config.storage.primary_file, PathBuf::from("people.json"));
        assert_eq!(config.storage.backup_file, "backup_people.json");
        assert_eq!(config.storage.load_policy, LoadPolicy::Strict);
        assert_eq!(config.logging.file, PathBuf::from("log.txt"));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_document_fills_defaults() {
        let config = ContactsConfig::from_toml_str("[storage]\nload_policy = \"lenient\"\n").unwrap();
        assert_eq!(config.storage.load_policy, LoadPolicy::Lenient);
        assert_eq!(config.storage.primary_file, PathBuf::from("people.json"));
        assert_eq!(config.logging, LoggingConfig::default());
    }

    #[test]
    fn test_backup_is_sibling_of_primary() {
        let storage = StorageConfig {
            primary_file: PathBuf::from("data/contacts.json"),
            ..StorageConfig::default()
        };
        let base = Path::new("/srv");
        assert_eq!(storage.primary_path(base), PathBuf::from("/srv/data/contacts.json"));
        assert_eq!(storage.backup_path(base), PathBuf::from("/srv/data/backup_people.json"));
    }

    #[test]
    fn test_absolute_primary_ignores_base() {
        let storage = StorageConfig {
            primary_file: PathBuf::from("/var/lib/contacts/people.json"),
            ..StorageConfig::default()
        };
        let base = Path::new("/home/user");
        assert_eq!(
            storage.backup_path(base),
            PathBuf::from("/var/lib/contacts/backup_people.json")
        );
    }

    #[test]
    fn test_backup_with_directory_is_rejected() {
        let err = ContactsConfig::from_toml_str("[storage]\nbackup_file = \"other/backup.json\"\n")
            .unwrap_err();
        assert!(matches!(err, ContactsError::Config(_)));
    }

    #[test]
    fn test_backup_equal_to_primary_is_rejected() {
        let err = ContactsConfig::from_toml_str("[storage]\nbackup_file = \"people.json\"\n")
            .unwrap_err();
        assert!(matches!(err, ContactsError::Config(_)));
    }

    #[test]
    fn test_unknown_policy_is_config_error() {
        let err = ContactsConfig::from_toml_str("[storage]\nload_policy = \"sometimes\"\n")
            .unwrap_err();
        assert!(matches!(err, ContactsError::Config(_)));
    }
}
