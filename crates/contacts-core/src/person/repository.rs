//! Person repository trait.
//!
//! Defines the interface for persisting the whole contact collection.

use super::model::Person;
use crate::error::Result;

/// Where a loaded collection came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// Parsed from the primary file.
    Primary,
    /// The primary file was corrupt; parsed from the backup file.
    Backup,
    /// Nothing usable was found and the lenient policy substituted an empty
    /// collection.
    Empty(EmptyReason),
}

/// Why a lenient load fell back to an empty collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmptyReason {
    PrimaryUnreadable,
    BackupUnreadable,
    BackupCorrupted,
}

/// Result of a successful load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOutcome {
    pub people: Vec<Person>,
    pub source: LoadSource,
}

impl LoadOutcome {
    pub fn primary(people: Vec<Person>) -> Self {
        Self {
            people,
            source: LoadSource::Primary,
        }
    }

    pub fn backup(people: Vec<Person>) -> Self {
        Self {
            people,
            source: LoadSource::Backup,
        }
    }

    pub fn empty(reason: EmptyReason) -> Self {
        Self {
            people: Vec::new(),
            source: LoadSource::Empty(reason),
        }
    }

    /// True when the primary file was not the source of the result.
    pub fn recovered(&self) -> bool {
        self.source != LoadSource::Primary
    }
}

/// Result of a successful save.
///
/// The primary write always succeeded. `backup_error` carries the message of
/// a failed backup write, which does not fail the save.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SaveOutcome {
    pub backup_error: Option<String>,
}

impl SaveOutcome {
    pub fn mirrored() -> Self {
        Self::default()
    }

    pub fn backup_failed(message: impl Into<String>) -> Self {
        Self {
            backup_error: Some(message.into()),
        }
    }

    pub fn is_mirrored(&self) -> bool {
        self.backup_error.is_none()
    }
}

/// An abstract repository for the contact collection.
///
/// This trait decouples the session from the storage mechanism (mirrored JSON
/// files, memory for tests).
///
/// # Implementation Notes
///
/// Implementations should handle:
/// - Whole-collection replacement on save (no partial or append writes)
/// - Exactly one load policy per instance
pub trait PersonRepository: Send + Sync {
    /// Loads the full collection.
    ///
    /// # Returns
    ///
    /// - `Ok(LoadOutcome)`: The records and where they came from
    /// - `Err(ContactsError)`: The store runs a strict policy and nothing
    ///   usable could be read
    fn load(&self) -> Result<LoadOutcome>;

    /// Replaces the stored collection with `people`.
    ///
    /// # Returns
    ///
    /// - `Ok(SaveOutcome)`: Primary written; check `backup_error` for the mirror
    /// - `Err(ContactsError)`: Serialization or primary write failed
    fn save(&self, people: &[Person]) -> Result<SaveOutcome>;
}
