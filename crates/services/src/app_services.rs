use std::sync::Arc;

use quiz_core::QuestionBank;
use storage::Storage;

use crate::error::AppServicesError;
use crate::sessions::{AttemptHistoryService, QuizLoopService};
use crate::{Clock, RandomSource};

/// Assembles app-facing services over one question bank and one store.
#[derive(Clone)]
pub struct AppServices {
    bank: Arc<QuestionBank>,
    quiz_loop: Arc<QuizLoopService>,
    history: Arc<AttemptHistoryService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the built-in bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails or the
    /// built-in bank does not validate.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        random: RandomSource,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let bank = QuestionBank::builtin()?;
        tracing::info!(topics = bank.len(), "question bank loaded");
        Ok(Self::from_storage(storage, bank, clock, random))
    }

    /// Build services over volatile storage and the built-in bank.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Bank` if the built-in bank does not validate.
    pub fn in_memory(clock: Clock, random: RandomSource) -> Result<Self, AppServicesError> {
        let bank = QuestionBank::builtin()?;
        Ok(Self::from_storage(Storage::in_memory(), bank, clock, random))
    }

    #[must_use]
    pub fn from_storage(
        storage: Storage,
        bank: QuestionBank,
        clock: Clock,
        random: RandomSource,
    ) -> Self {
        let bank = Arc::new(bank);
        let quiz_loop = Arc::new(QuizLoopService::new(
            Arc::clone(&bank),
            clock,
            random,
            Arc::clone(&storage.attempts),
        ));
        let history = Arc::new(AttemptHistoryService::new(Arc::clone(&storage.attempts)));

        Self {
            bank,
            quiz_loop,
            history,
        }
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    #[must_use]
    pub fn quiz_loop(&self) -> Arc<QuizLoopService> {
        Arc::clone(&self.quiz_loop)
    }

    #[must_use]
    pub fn history(&self) -> Arc<AttemptHistoryService> {
        Arc::clone(&self.history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;

    #[test]
    fn in_memory_services_share_the_builtin_bank() {
        let services = AppServices::in_memory(fixed_clock(), RandomSource::seeded(1)).unwrap();

        assert!(!services.bank().is_empty());
        assert!(Arc::ptr_eq(&services.bank(), &services.quiz_loop().bank()));
    }
}
