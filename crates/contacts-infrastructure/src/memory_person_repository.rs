//! In-memory PersonRepository implementation.

use contacts_core::error::{ContactsError, Result};
use contacts_core::person::{LoadOutcome, Person, PersonRepository, SaveOutcome};
use std::sync::Mutex;

/// A repository that keeps the saved collection in memory.
///
/// Loading an untouched repository yields an empty collection from the
/// "primary". Useful for driving a session without touching the file system.
#[derive(Default)]
pub struct InMemoryPersonRepository {
    data: Mutex<Vec<Person>>,
}

impl InMemoryPersonRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository that already holds `people`.
    pub fn with_people(people: Vec<Person>) -> Self {
        Self {
            data: Mutex::new(people),
        }
    }

    /// Snapshot of what was last saved.
    pub fn snapshot(&self) -> Result<Vec<Person>> {
        self.data
            .lock()
            .map(|data| data.clone())
            .map_err(|e| ContactsError::io(format!("Failed to lock in-memory store: {}", e)))
    }
}

impl PersonRepository for InMemoryPersonRepository {
    fn load(&self) -> Result<LoadOutcome> {
        Ok(LoadOutcome::primary(self.snapshot()?))
    }

    fn save(&self, people: &[Person]) -> Result<SaveOutcome> {
        let mut data = self
            .data
            .lock()
            .map_err(|e| ContactsError::io(format!("Failed to lock in-memory store: {}", e)))?;
        *data = people.to_vec();
        Ok(SaveOutcome::mirrored())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let repo = InMemoryPersonRepository::new();
        let original = vec![Person::new("X", 99, "error"), Person::new("Y", 0, "none")];

        repo.save(&original).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.people, original);
        assert!(!loaded.recovered());
    }

    #[test]
    fn test_load_empty() {
        let repo = InMemoryPersonRepository::new();
        assert!(repo.load().unwrap().people.is_empty());
    }
}
