//! Person domain module.
//!
//! This module contains the contact record model, the in-memory ordered
//! collection a session works on, and the repository interface used to
//! persist it.
//!
//! # Module Structure
//!
//! - `model`: `Person` (the persisted record) and `PersonId` (session-only identity)
//! - `book`: `PersonBook`, the ordered, identified collection
//! - `repository`: `PersonRepository` trait plus load/save outcome types
//!
//! # Usage
//!
//! ```ignore
//! use contacts_core::person::{Person, PersonBook, PersonRepository};
//! ```

mod book;
mod model;
pub mod repository;

// Re-export public API
pub use book::PersonBook;
pub use model::{Person, PersonId};

pub use repository::{EmptyReason, LoadOutcome, LoadSource, PersonRepository, SaveOutcome};
