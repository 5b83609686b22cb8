//! JSON file-based PersonRepository implementation with a mirrored backup.

use contacts_core::error::{ContactsError, Result};
use contacts_core::person::{EmptyReason, LoadOutcome, Person, PersonRepository, SaveOutcome};
use contacts_core::LoadPolicy;
use contacts_core::config::StorageConfig;
use std::fs;
use std::path::{Path, PathBuf};

/// A repository that stores the whole collection in a primary JSON file and
/// mirrors every save into a backup file next to it.
///
/// Responsibilities:
/// - Load the primary, falling back to the backup when the primary is corrupt
/// - Apply exactly one `LoadPolicy` to unrecoverable loads
/// - Write the primary, then the backup, with identical bytes
///
/// Does NOT:
/// - Write through a temporary file or rename; a crash mid-write can tear
///   the primary
/// - Lock the files (single process, single user)
///
/// File layout:
/// ```text
/// dir/
/// ├── people.json          # primary
/// └── backup_people.json   # mirror of the last save
/// ```
pub struct JsonFilePersonRepository {
    primary: PathBuf,
    backup: PathBuf,
    policy: LoadPolicy,
}

impl JsonFilePersonRepository {
    /// Creates a repository over explicit paths.
    pub fn new(primary: PathBuf, backup: PathBuf, policy: LoadPolicy) -> Self {
        Self {
            primary,
            backup,
            policy,
        }
    }

    /// Creates a repository from storage settings, resolving relative paths
    /// against `base_dir`.
    pub fn from_config(storage: &StorageConfig, base_dir: &Path) -> Self {
        Self::new(
            storage.primary_path(base_dir),
            storage.backup_path(base_dir),
            storage.load_policy,
        )
    }

    pub fn primary_path(&self) -> &Path {
        &self.primary
    }

    pub fn backup_path(&self) -> &Path {
        &self.backup
    }

    /// Applies the configured policy to a load that found nothing usable.
    fn give_up(&self, error: ContactsError, reason: EmptyReason) -> Result<LoadOutcome> {
        match self.policy {
            LoadPolicy::Strict => Err(error),
            LoadPolicy::Lenient => {
                let message = match reason {
                    EmptyReason::PrimaryUnreadable => "main file unreadable, starting with no contacts",
                    EmptyReason::BackupUnreadable => {
                        "main file corrupted and backup unreadable, starting with no contacts"
                    }
                    EmptyReason::BackupCorrupted => {
                        "main file and backup both corrupted, starting with no contacts"
                    }
                };
                tracing::warn!(error = %error, "{}", message);
                Ok(LoadOutcome::empty(reason))
            }
        }
    }
}

impl PersonRepository for JsonFilePersonRepository {
    fn load(&self) -> Result<LoadOutcome> {
        let primary = match fs::read(&self.primary) {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = ContactsError::PrimaryUnreadable {
                    path: self.primary.display().to_string(),
                    message: e.to_string(),
                };
                return self.give_up(error, EmptyReason::PrimaryUnreadable);
            }
        };

        let primary_error = match decode(&primary) {
            Ok(people) => {
                tracing::debug!(
                    "Loaded {} contacts from {}",
                    people.len(),
                    self.primary.display()
                );
                return Ok(LoadOutcome::primary(people));
            }
            Err(e) => e,
        };

        tracing::warn!(
            "Main file {} corrupted ({}), trying backup {}",
            self.primary.display(),
            primary_error,
            self.backup.display()
        );

        let backup = match fs::read(&self.backup) {
            Ok(bytes) => bytes,
            Err(e) => {
                let error = ContactsError::BackupUnreadable {
                    path: self.backup.display().to_string(),
                    message: e.to_string(),
                };
                return self.give_up(error, EmptyReason::BackupUnreadable);
            }
        };

        match decode(&backup) {
            Ok(people) => {
                tracing::warn!(
                    "Loaded {} contacts from backup {}",
                    people.len(),
                    self.backup.display()
                );
                Ok(LoadOutcome::backup(people))
            }
            Err(e) => {
                let error = ContactsError::BackupCorrupted {
                    path: self.backup.display().to_string(),
                    message: e.to_string(),
                };
                self.give_up(error, EmptyReason::BackupCorrupted)
            }
        }
    }

    fn save(&self, people: &[Person]) -> Result<SaveOutcome> {
        let data = encode(people)?;

        fs::write(&self.primary, &data).map_err(|e| ContactsError::PrimaryWriteFailed {
            path: self.primary.display().to_string(),
            message: e.to_string(),
        })?;

        if let Err(e) = fs::write(&self.backup, &data) {
            tracing::warn!(
                "Failed to write backup {}: {}",
                self.backup.display(),
                e
            );
            return Ok(SaveOutcome::backup_failed(format!(
                "failed to write backup file '{}': {}",
                self.backup.display(),
                e
            )));
        }

        tracing::debug!(
            "Saved {} contacts to {} (mirrored to {})",
            people.len(),
            self.primary.display(),
            self.backup.display()
        );
        Ok(SaveOutcome::mirrored())
    }
}

/// Serializes the collection as an indented JSON array.
pub fn encode(people: &[Person]) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(people)?)
}

/// Parses a stored collection. A `null` document is an empty collection and
/// a `null` element is a zero-value record; empty content is not valid.
pub fn decode(bytes: &[u8]) -> Result<Vec<Person>> {
    let people: Option<Vec<Option<Person>>> = serde_json::from_slice(bytes)?;
    Ok(people
        .unwrap_or_default()
        .into_iter()
        .map(Option::unwrap_or_default)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts_core::person::LoadSource;
    use tempfile::TempDir;

    fn create_test_repository(policy: LoadPolicy) -> (JsonFilePersonRepository, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonFilePersonRepository::new(
            temp_dir.path().join("people.json"),
            temp_dir.path().join("backup_people.json"),
            policy,
        );
        (repo, temp_dir)
    }

    fn sample() -> Vec<Person> {
        vec![Person::new("Ali", 30, "111"), Person::new("Ayşe", 25, "222")]
    }

    #[test]
    fn test_encode_is_indented_array() {
        let bytes = encode(&[Person::new("Ali", 30, "111")]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(
            text,
            "[\n  {\n    \"name\": \"Ali\",\n    \"age\": 30,\n    \"phone\": \"111\"\n  }\n]"
        );
    }

    #[test]
    fn test_decode_null_and_empty_array() {
        assert!(decode(b"null").unwrap().is_empty());
        assert!(decode(b"[]").unwrap().is_empty());
    }

    #[test]
    fn test_decode_null_element_is_zero_record() {
        let people = decode(br#"[null, {"name": "Ali"}]"#).unwrap();
        assert_eq!(people, vec![Person::default(), Person::new("Ali", 0, "")]);
    }

    #[test]
    fn test_decode_mixed_case_keys() {
        let people = decode(br#"[{"Name":"Ali","AGE":30,"Phone":"111"}]"#).unwrap();
        assert_eq!(people, vec![Person::new("Ali", 30, "111")]);
    }

    #[test]
    fn test_decode_rejects_empty_content() {
        assert!(decode(b"").is_err());
        assert!(decode(b"   \n").is_err());
        assert!(decode(b"{\"name\":\"Ali\"}").is_err());
    }

    #[test]
    fn test_save_writes_identical_mirror() {
        let (repo, _temp_dir) = create_test_repository(LoadPolicy::Strict);
        let outcome = repo.save(&sample()).unwrap();
        assert!(outcome.is_mirrored());

        let primary = fs::read(repo.primary_path()).unwrap();
        let backup = fs::read(repo.backup_path()).unwrap();
        assert_eq!(primary, backup);
    }

    #[test]
    fn test_save_replaces_prior_content() {
        let (repo, _temp_dir) = create_test_repository(LoadPolicy::Strict);
        repo.save(&sample()).unwrap();
        repo.save(&[Person::new("Veli", 41, "333")]).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.people, vec![Person::new("Veli", 41, "333")]);
    }

    #[test]
    fn test_backup_write_failure_is_not_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let repo = JsonFilePersonRepository::new(
            temp_dir.path().join("people.json"),
            temp_dir.path().join("missing-dir").join("backup_people.json"),
            LoadPolicy::Strict,
        );

        let outcome = repo.save(&sample()).unwrap();
        assert!(!outcome.is_mirrored());
        assert!(outcome.backup_error.unwrap().contains("backup_people.json"));
        assert_eq!(repo.load().unwrap().people, sample());
    }

    #[test]
    fn test_primary_write_failure_skips_backup() {
        let temp_dir = TempDir::new().unwrap();
        let backup = temp_dir.path().join("backup_people.json");
        fs::write(&backup, b"[]").unwrap();
        let repo = JsonFilePersonRepository::new(
            temp_dir.path().join("missing-dir").join("people.json"),
            backup.clone(),
            LoadPolicy::Strict,
        );

        let err = repo.save(&sample()).unwrap_err();
        assert!(matches!(err, ContactsError::PrimaryWriteFailed { .. }));
        assert_eq!(fs::read(&backup).unwrap(), b"[]");
    }

    #[test]
    fn test_lenient_reasons_are_distinct() {
        let (repo, _temp_dir) = create_test_repository(LoadPolicy::Lenient);
        assert_eq!(
            repo.load().unwrap().source,
            LoadSource::Empty(EmptyReason::PrimaryUnreadable)
        );

        fs::write(repo.primary_path(), b"{oops").unwrap();
        assert_eq!(
            repo.load().unwrap().source,
            LoadSource::Empty(EmptyReason::BackupUnreadable)
        );

        fs::write(repo.backup_path(), b"").unwrap();
        assert_eq!(
            repo.load().unwrap().source,
            LoadSource::Empty(EmptyReason::BackupCorrupted)
        );
    }
}
