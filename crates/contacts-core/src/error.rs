//! Error types for the contacts application.

use thiserror::Error;

/// A shared error type for the entire contacts application.
///
/// Load-side variants (`PrimaryUnreadable`, `BackupUnreadable`,
/// `BackupCorrupted`) are only produced by a store running the strict load
/// policy. `PrimaryWriteFailed` is the only fatal save-side failure; a failed
/// backup write is reported through `SaveOutcome` instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ContactsError {
    /// The primary record file could not be read
    #[error("failed to read main file '{path}': {message}")]
    PrimaryUnreadable { path: String, message: String },

    /// The primary file was corrupt and the backup could not be read
    #[error("failed to read backup file '{path}': {message}")]
    BackupUnreadable { path: String, message: String },

    /// The primary file was corrupt and so was the backup
    #[error("failed to parse backup file '{path}': {message}")]
    BackupCorrupted { path: String, message: String },

    /// Writing the primary record file failed
    #[error("failed to write file '{path}': {message}")]
    PrimaryWriteFailed { path: String, message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON"
        message: String,
    },

    /// A 1-based display index outside the current collection
    #[error("Invalid index {index} (collection holds {len} contacts)")]
    InvalidIndex { index: usize, len: usize },

    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (terminal or file system operations outside the record store)
    #[error("IO error: {message}")]
    Io { message: String },
}

impl ContactsError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this error was produced by a strict load
    pub fn is_load_failure(&self) -> bool {
        matches!(
            self,
            Self::PrimaryUnreadable { .. } | Self::BackupUnreadable { .. } | Self::BackupCorrupted { .. }
        )
    }

    /// Check if this error means stored content could not be parsed
    pub fn is_corruption(&self) -> bool {
        matches!(self, Self::BackupCorrupted { .. } | Self::Serialization { .. })
    }

    /// Check if this is an index error
    pub fn is_invalid_index(&self) -> bool {
        matches!(self, Self::InvalidIndex { .. })
    }

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for ContactsError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for ContactsError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for ContactsError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, ContactsError>`.
pub type Result<T> = std::result::Result<T, ContactsError>;
