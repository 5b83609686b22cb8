pub mod json_file_person_repository;
pub mod memory_person_repository;
pub mod paths;
pub mod storage;

pub use crate::json_file_person_repository::JsonFilePersonRepository;
pub use crate::memory_person_repository::InMemoryPersonRepository;
pub use crate::paths::ContactsPaths;
pub use crate::storage::ConfigStorage;
