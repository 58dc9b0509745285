#![forbid(unsafe_code)]

pub mod attempts;
pub mod repository;
pub mod sqlite;

pub use attempts::{ATTEMPTS_KEY, AttemptRepository, KvAttemptRepository, MAX_STORED_ATTEMPTS};
pub use repository::{InMemoryRepository, KeyValueRepository, Storage, StorageError};
