pub mod config;
pub mod error;
pub mod person;

// Re-export common types
pub use config::{ContactsConfig, LoadPolicy};
pub use error::{ContactsError, Result};
