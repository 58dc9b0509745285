//! The attempt store: a bounded, newest-first list of completed attempts
//! persisted as one JSON array under a fixed key.

use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Attempt;

use crate::repository::{KeyValueRepository, StorageError};

/// Storage key holding the serialized attempt list.
pub const ATTEMPTS_KEY: &str = "quiz_attempts";

/// Only the most recent attempts are kept; older ones are dropped on save.
pub const MAX_STORED_ATTEMPTS: usize = 200;

#[async_trait]
pub trait AttemptRepository: Send + Sync {
    /// All stored attempts, newest first.
    ///
    /// Unreadable or malformed data reads as an empty history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only when the backend itself fails.
    async fn load_attempts(&self) -> Result<Vec<Attempt>, StorageError>;

    /// Prepend `attempt` and write back at most `MAX_STORED_ATTEMPTS` records.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the list cannot be read or written.
    async fn save_attempt(&self, attempt: &Attempt) -> Result<(), StorageError>;
}

/// `AttemptRepository` on top of any key/value backend.
#[derive(Clone)]
pub struct KvAttemptRepository {
    values: Arc<dyn KeyValueRepository>,
}

impl KvAttemptRepository {
    #[must_use]
    pub fn new(values: Arc<dyn KeyValueRepository>) -> Self {
        Self { values }
    }
}

#[async_trait]
impl AttemptRepository for KvAttemptRepository {
    async fn load_attempts(&self) -> Result<Vec<Attempt>, StorageError> {
        let raw = self.values.get_value(ATTEMPTS_KEY).await?;
        Ok(raw.as_deref().map(decode_attempts).unwrap_or_default())
    }

    async fn save_attempt(&self, attempt: &Attempt) -> Result<(), StorageError> {
        let mut all = self.load_attempts().await?;
        all.insert(0, attempt.clone());
        all.truncate(MAX_STORED_ATTEMPTS);

        let encoded = encode_attempts(&all)?;
        self.values.put_value(ATTEMPTS_KEY, &encoded).await
    }
}

/// Decode a persisted attempt list. Anything that is not a JSON array of
/// valid attempts decodes to an empty list.
#[must_use]
pub fn decode_attempts(raw: &str) -> Vec<Attempt> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    match serde_json::from_str::<Vec<Attempt>>(raw) {
        Ok(attempts) => attempts,
        Err(err) => {
            tracing::warn!(error = %err, "discarding unreadable attempt history");
            Vec::new()
        }
    }
}

/// # Errors
///
/// Returns `StorageError::Serialization` if encoding fails.
pub fn encode_attempts(attempts: &[Attempt]) -> Result<String, StorageError> {
    serde_json::to_string(attempts).map_err(|e| StorageError::Serialization(e.to_string()))
}
