//! Session state for one interactive run.

use contacts_core::error::Result;
use contacts_core::person::{
    LoadSource, Person, PersonBook, PersonId, PersonRepository, SaveOutcome,
};
use std::sync::Arc;

/// Outcome of a name search.
#[derive(Debug, PartialEq, Eq)]
pub enum SearchResult<'a> {
    /// The book holds no contacts at all.
    NoContacts,
    /// The book has contacts but none matched.
    NotFound,
    /// Matches with their 1-based display positions.
    Matches(Vec<(usize, &'a Person)>),
}

/// The explicit state a command handler works on.
///
/// `Session` owns the in-memory `PersonBook` and the repository it was
/// loaded from. Mutations only touch the book; the repository is used once
/// at start and again on every explicit `save`.
pub struct Session {
    book: PersonBook,
    repository: Arc<dyn PersonRepository>,
}

impl Session {
    /// Loads the collection and starts a session over it.
    ///
    /// # Returns
    ///
    /// The session and where the initial collection came from.
    ///
    /// # Errors
    ///
    /// Propagates the repository's load error (strict policy only).
    pub fn start(repository: Arc<dyn PersonRepository>) -> Result<(Self, LoadSource)> {
        let outcome = repository.load()?;
        tracing::info!(
            "Session started with {} contacts ({:?})",
            outcome.people.len(),
            outcome.source
        );
        let session = Self {
            book: PersonBook::from_people(outcome.people),
            repository,
        };
        Ok((session, outcome.source))
    }

    pub fn book(&self) -> &PersonBook {
        &self.book
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.book.is_dirty()
    }

    pub fn add(&mut self, person: Person) -> PersonId {
        self.book.add(person)
    }

    /// Translates a 1-based display position to a stable identifier.
    pub fn resolve(&self, index: usize) -> Result<PersonId> {
        self.book.id_at(index)
    }

    pub fn replace(&mut self, id: PersonId, person: Person) -> Result<()> {
        self.book.replace(id, person)
    }

    pub fn remove(&mut self, id: PersonId) -> Result<Person> {
        self.book.remove(id)
    }

    pub fn search(&self, query: &str) -> SearchResult<'_> {
        if self.book.is_empty() {
            return SearchResult::NoContacts;
        }
        let matches = self.book.search_by_name(query);
        if matches.is_empty() {
            SearchResult::NotFound
        } else {
            SearchResult::Matches(matches)
        }
    }

    /// Writes the current collection through the repository.
    ///
    /// On success the book is marked clean, even when only the primary was
    /// written.
    pub fn save(&mut self) -> Result<SaveOutcome> {
        let outcome = self.repository.save(&self.book.to_people())?;
        self.book.mark_saved();
        tracing::info!("Saved {} contacts", self.book.len());
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contacts_core::error::ContactsError;
    use contacts_core::person::LoadOutcome;

    struct FailingRepository;

    impl PersonRepository for FailingRepository {
        fn load(&self) -> Result<LoadOutcome> {
            Ok(LoadOutcome::primary(vec![Person::new("Ali", 30, "111")]))
        }

        fn save(&self, _people: &[Person]) -> Result<SaveOutcome> {
            Err(ContactsError::PrimaryWriteFailed {
                path: "people.json".to_string(),
                message: "read-only file system".to_string(),
            })
        }
    }

    struct BrokenRepository;

    impl PersonRepository for BrokenRepository {
        fn load(&self) -> Result<LoadOutcome> {
            Err(ContactsError::PrimaryUnreadable {
                path: "people.json".to_string(),
                message: "missing".to_string(),
            })
        }

        fn save(&self, _people: &[Person]) -> Result<SaveOutcome> {
            Ok(SaveOutcome::mirrored())
        }
    }

    #[test]
    fn test_start_propagates_load_error() {
        let result = Session::start(Arc::new(BrokenRepository));
        assert!(matches!(
            result.err(),
            Some(ContactsError::PrimaryUnreadable { .. })
        ));
    }

    #[test]
    fn test_failed_save_keeps_unsaved_changes() {
        let (mut session, source) = Session::start(Arc::new(FailingRepository)).unwrap();
        assert_eq!(source, LoadSource::Primary);

        session.add(Person::new("Ayşe", 25, "222"));
        let err = session.save().unwrap_err();
        assert!(matches!(err, ContactsError::PrimaryWriteFailed { .. }));
        assert!(session.has_unsaved_changes());
        assert_eq!(session.book().len(), 2);
    }

    #[test]
    fn test_search_distinguishes_empty_book() {
        let (mut session, _) = Session::start(Arc::new(FailingRepository)).unwrap();
        assert_eq!(session.search("veli"), SearchResult::NotFound);
        match session.search("ALI") {
            SearchResult::Matches(hits) => assert_eq!(hits[0].0, 1),
            other => panic!("unexpected result: {other:?}"),
        }

        let id = session.resolve(1).unwrap();
        session.remove(id).unwrap();
        assert_eq!(session.search("ali"), SearchResult::NoContacts);
    }
}
