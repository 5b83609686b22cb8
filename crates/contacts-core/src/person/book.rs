//! The in-memory contact collection for one session.

use super::model::{Person, PersonId};
use crate::error::{ContactsError, Result};

/// A record tagged with its session identity.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    id: PersonId,
    person: Person,
}

/// The ordered collection of contacts a session works on.
///
/// `PersonBook` keeps insertion order (which is also display order) and tags
/// every record with a `PersonId`. Commands that address a record by its
/// 1-based display position resolve the position to an identifier first and
/// then act on the identifier, so the position is only a display convenience.
///
/// The book also tracks whether it has changes that were not saved yet.
#[derive(Debug, Default)]
pub struct PersonBook {
    entries: Vec<Entry>,
    dirty: bool,
}

impl PersonBook {
    /// Creates an empty book.
    ///
    /// # Examples
    ///
    /// ```
    /// use contacts_core::person::PersonBook;
    ///
    /// let book = PersonBook::new();
    /// assert!(book.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a book from loaded records, assigning fresh identifiers.
    ///
    /// The result is clean: nothing is pending a save.
    pub fn from_people(people: Vec<Person>) -> Self {
        Self {
            entries: people
                .into_iter()
                .map(|person| Entry {
                    id: PersonId::new(),
                    person,
                })
                .collect(),
            dirty: false,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the book changed since it was loaded or last saved.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Clears the dirty flag after a successful save.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }

    /// Records in display order, paired with their 1-based position.
    pub fn iter_numbered(&self) -> impl Iterator<Item = (usize, &Person)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, entry)| (i + 1, &entry.person))
    }

    /// Snapshot of the records in display order, as handed to a repository.
    pub fn to_people(&self) -> Vec<Person> {
        self.entries.iter().map(|e| e.person.clone()).collect()
    }

    /// Appends a record and returns its new identifier.
    pub fn add(&mut self, person: Person) -> PersonId {
        let id = PersonId::new();
        self.entries.push(Entry { id, person });
        self.dirty = true;
        id
    }

    /// Resolves a 1-based display position to the identifier currently there.
    ///
    /// # Errors
    ///
    /// Returns `ContactsError::InvalidIndex` when `index` is 0 or past the end.
    pub fn id_at(&self, index: usize) -> Result<PersonId> {
        if index == 0 || index > self.entries.len() {
            return Err(ContactsError::InvalidIndex {
                index,
                len: self.entries.len(),
            });
        }
        Ok(self.entries[index - 1].id)
    }

    /// Replaces the whole record behind `id`; the identifier is kept.
    pub fn replace(&mut self, id: PersonId, person: Person) -> Result<()> {
        let pos = self
            .position(id)
            .ok_or_else(|| ContactsError::not_found("person", id.to_string()))?;
        self.entries[pos].person = person;
        self.dirty = true;
        Ok(())
    }

    /// Removes the record behind `id`, shifting later records up by one.
    pub fn remove(&mut self, id: PersonId) -> Result<Person> {
        let pos = self
            .position(id)
            .ok_or_else(|| ContactsError::not_found("person", id.to_string()))?;
        let entry = self.entries.remove(pos);
        self.dirty = true;
        Ok(entry.person)
    }

    /// All records whose name equals `query` ignoring case, with their
    /// 1-based positions, in display order.
    pub fn search_by_name(&self, query: &str) -> Vec<(usize, &Person)> {
        self.iter_numbered()
            .filter(|(_, person)| person.name_matches(query))
            .collect()
    }

    fn position(&self, id: PersonId) -> Option<usize> {
        self.entries.iter().position(|e| e.id == id)
    }
}
