use chrono::{DateTime, Utc};
use std::sync::Arc;

use quiz_core::model::{Attempt, TopicId};
use storage::AttemptRepository;

/// Presentation-agnostic list item for a stored attempt.
///
/// Not a UI view-model: timestamps stay typed and labels unformatted so the
/// UI can render them however it likes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttemptListItem {
    pub topic_id: TopicId,
    pub topic_title: String,
    pub score: u32,
    pub total: u32,
    pub percent: u32,
    pub badge: String,
    pub completed_at: DateTime<Utc>,
}

impl AttemptListItem {
    #[must_use]
    pub fn from_attempt(attempt: &Attempt) -> Self {
        Self {
            topic_id: attempt.topic_id().clone(),
            topic_title: attempt.topic_title().to_owned(),
            score: attempt.score(),
            total: attempt.total(),
            percent: attempt.percent(),
            badge: attempt.badge().to_owned(),
            completed_at: attempt.completed_at(),
        }
    }
}

/// Read side of the attempt store for history screens.
#[derive(Clone)]
pub struct AttemptHistoryService {
    attempts: Arc<dyn AttemptRepository>,
}

impl AttemptHistoryService {
    #[must_use]
    pub fn new(attempts: Arc<dyn AttemptRepository>) -> Self {
        Self { attempts }
    }

    /// Every stored attempt, newest first.
    ///
    /// History is informational, so a storage failure is logged and shows up
    /// as an empty list rather than an error.
    pub async fn load(&self) -> Vec<AttemptListItem> {
        match self.attempts.load_attempts().await {
            Ok(attempts) => attempts.iter().map(AttemptListItem::from_attempt).collect(),
            Err(err) => {
                tracing::warn!(error = %err, "failed to load attempt history");
                Vec::new()
            }
        }
    }

    /// The most recent `limit` attempts for one topic, newest first.
    pub async fn attempts_for_topic(&self, topic: &TopicId, limit: usize) -> Vec<AttemptListItem> {
        self.load()
            .await
            .into_iter()
            .filter(|item| &item.topic_id == topic)
            .take(limit)
            .collect()
    }
}
