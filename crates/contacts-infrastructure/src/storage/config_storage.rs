//! Config file storage.
//!
//! Reads `contacts.toml` into the typed `ContactsConfig`. Missing and empty
//! files are not errors; they mean "use defaults".

use contacts_core::config::ContactsConfig;
use contacts_core::error::{ContactsError, Result};
use std::fs;
use std::path::PathBuf;

/// A handle to one configuration file.
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates a new config storage handle.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the config file (usually a .toml file)
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads and validates the config file.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(ContactsConfig))`: Successfully loaded
    /// - `Ok(None)`: File doesn't exist or is empty
    /// - `Err(ContactsError::Config)`: Unreadable, malformed or invalid
    pub fn load(&self) -> Result<Option<ContactsConfig>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            ContactsError::config(format!("Failed to read {}: {}", self.path.display(), e))
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }

        let config = ContactsConfig::from_toml_str(&content).map_err(|e| {
            ContactsError::config(format!("{}: {}", self.path.display(), e))
        })?;
        Ok(Some(config))
    }

    /// Loads the config file, falling back to defaults when there is none.
    pub fn load_or_default(&self) -> Result<ContactsConfig> {
        Ok(self.load()?.unwrap_or_default())
    }
}
