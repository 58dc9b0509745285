use std::sync::Arc;

use quiz_core::QuestionBank;
use quiz_core::model::Attempt;
use storage::AttemptRepository;

use super::service::{QuizIntent, QuizSession, Transition};
use crate::error::SessionError;
use crate::{Clock, RandomSource};

/// Whether the attempt produced by an intent reached storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The intent did not finish a quiz.
    NotNeeded,
    Saved,
    /// The attempt is still shown as the result but was not persisted.
    Failed,
}

/// Result of applying an intent through the loop service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizStep {
    pub transition: Transition,
    pub saved: SaveOutcome,
}

/// Drives a `QuizSession` and persists every finished attempt.
#[derive(Clone)]
pub struct QuizLoopService {
    bank: Arc<QuestionBank>,
    clock: Clock,
    random: RandomSource,
    attempts: Arc<dyn AttemptRepository>,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(
        bank: Arc<QuestionBank>,
        clock: Clock,
        random: RandomSource,
        attempts: Arc<dyn AttemptRepository>,
    ) -> Self {
        Self {
            bank,
            clock,
            random,
            attempts,
        }
    }

    #[must_use]
    pub fn bank(&self) -> Arc<QuestionBank> {
        Arc::clone(&self.bank)
    }

    /// A fresh session over the shared bank.
    #[must_use]
    pub fn new_session(&self) -> QuizSession {
        QuizSession::new(Arc::clone(&self.bank), self.clock, self.random)
    }

    /// Apply `intent` to `session`, saving the attempt when the quiz completes.
    ///
    /// A failed save never rolls back the session: the result stays visible
    /// and the failure is reported in `QuizStep::saved`.
    pub async fn apply(&self, session: &mut QuizSession, intent: QuizIntent) -> QuizStep {
        let transition = session.apply(intent);
        let saved = self.persist(&transition).await;
        QuizStep { transition, saved }
    }

    /// Save the attempt carried by a `Completed` transition.
    ///
    /// For callers that apply intents to the session themselves and only need
    /// the write to happen asynchronously.
    pub async fn persist(&self, transition: &Transition) -> SaveOutcome {
        let Transition::Completed(attempt) = transition else {
            return SaveOutcome::NotNeeded;
        };
        match self.attempts.save_attempt(attempt).await {
            Ok(()) => SaveOutcome::Saved,
            Err(err) => {
                tracing::warn!(error = %err, topic = %attempt.topic_id(), "failed to save attempt");
                SaveOutcome::Failed
            }
        }
    }

    /// Write an already finished attempt again after a failed save.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` when the write fails.
    pub async fn retry_save(&self, attempt: &Attempt) -> Result<(), SessionError> {
        self.attempts
            .save_attempt(attempt)
            .await
            .inspect_err(|err| {
                tracing::warn!(error = %err, topic = %attempt.topic_id(), "retried save failed");
            })?;
        tracing::info!(topic = %attempt.topic_id(), "attempt saved on retry");
        Ok(())
    }
}
