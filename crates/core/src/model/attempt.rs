use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Badge, TopicId};
use crate::score::rounded_percent;
use crate::time::to_iso_millis;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AttemptError {
    #[error("score ({score}) exceeds total ({total})")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("percent out of range: {0}")]
    PercentOutOfRange(u32),

    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(String),
}

/// Immutable record of one completed quiz run.
///
/// Title and badge are snapshots taken at completion time so history stays
/// readable if the question bank changes later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "AttemptRecord", into = "AttemptRecord")]
pub struct Attempt {
    topic_id: TopicId,
    topic_title: String,
    score: u32,
    total: u32,
    percent: u32,
    completed_at: DateTime<Utc>,
    badge: String,
}

impl Attempt {
    /// Build an attempt, deriving percent and badge from the score.
    ///
    /// `completed_at` is truncated to whole milliseconds, the precision the
    /// persisted record keeps.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError::ScoreExceedsTotal` if `score > total`.
    pub fn new(
        topic_id: TopicId,
        topic_title: impl Into<String>,
        score: u32,
        total: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, AttemptError> {
        if score > total {
            return Err(AttemptError::ScoreExceedsTotal { score, total });
        }
        let percent = rounded_percent(score, total);
        Ok(Self {
            topic_id,
            topic_title: topic_title.into(),
            score,
            total,
            percent,
            completed_at: completed_at.trunc_subsecs(3),
            badge: Badge::for_percent(percent).label().to_owned(),
        })
    }

    /// Rehydrate an attempt exactly as it was stored.
    ///
    /// # Errors
    ///
    /// Returns `AttemptError` if score/total or percent are inconsistent.
    pub fn from_persisted(
        topic_id: TopicId,
        topic_title: String,
        score: u32,
        total: u32,
        percent: u32,
        completed_at: DateTime<Utc>,
        badge: String,
    ) -> Result<Self, AttemptError> {
        if score > total {
            return Err(AttemptError::ScoreExceedsTotal { score, total });
        }
        if percent > 100 {
            return Err(AttemptError::PercentOutOfRange(percent));
        }
        Ok(Self {
            topic_id,
            topic_title,
            score,
            total,
            percent,
            completed_at: completed_at.trunc_subsecs(3),
            badge,
        })
    }

    #[must_use]
    pub fn topic_id(&self) -> &TopicId {
        &self.topic_id
    }

    #[must_use]
    pub fn topic_title(&self) -> &str {
        &self.topic_title
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total(&self) -> u32 {
        self.total
    }

    #[must_use]
    pub fn percent(&self) -> u32 {
        self.percent
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Badge label as recorded at completion.
    #[must_use]
    pub fn badge(&self) -> &str {
        &self.badge
    }
}

/// Wire shape of an attempt inside the persisted JSON array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AttemptRecord {
    topic_id: TopicId,
    topic_title: String,
    score: u32,
    total: u32,
    percent: u32,
    #[serde(rename = "timestampISO")]
    timestamp_iso: String,
    badge: String,
}

impl TryFrom<AttemptRecord> for Attempt {
    type Error = AttemptError;

    fn try_from(record: AttemptRecord) -> Result<Self, Self::Error> {
        let completed_at = DateTime::parse_from_rfc3339(&record.timestamp_iso)
            .map_err(|_| AttemptError::InvalidTimestamp(record.timestamp_iso.clone()))?
            .with_timezone(&Utc);
        Attempt::from_persisted(
            record.topic_id,
            record.topic_title,
            record.score,
            record.total,
            record.percent,
            completed_at,
            record.badge,
        )
    }
}

impl From<Attempt> for AttemptRecord {
    fn from(attempt: Attempt) -> Self {
        Self {
            timestamp_iso: to_iso_millis(attempt.completed_at),
            topic_id: attempt.topic_id,
            topic_title: attempt.topic_title,
            score: attempt.score,
            total: attempt.total,
            percent: attempt.percent,
            badge: attempt.badge,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn derives_percent_and_badge() {
        let attempt = Attempt::new(TopicId::new("ai-101"), "AI", 12, 15, fixed_now()).unwrap();
        assert_eq!(attempt.percent(), 80);
        assert_eq!(attempt.badge(), "Strong Builder");
    }

    #[test]
    fn empty_quiz_scores_zero_percent() {
        let attempt = Attempt::new(TopicId::new("t"), "T", 0, 0, fixed_now()).unwrap();
        assert_eq!(attempt.percent(), 0);
        assert_eq!(attempt.badge(), "Keep Going");
    }

    #[test]
    fn rejects_score_above_total() {
        let err = Attempt::new(TopicId::new("t"), "T", 4, 3, fixed_now()).unwrap_err();
        assert_eq!(err, AttemptError::ScoreExceedsTotal { score: 4, total: 3 });
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let attempt = Attempt::new(TopicId::new("ai-101"), "AI", 15, 15, fixed_now()).unwrap();
        let value = serde_json::to_value(&attempt).unwrap();
        assert_eq!(value["topicId"], "ai-101");
        assert_eq!(value["topicTitle"], "AI");
        assert_eq!(value["timestampISO"], "2023-11-14T22:13:20.000Z");
        assert_eq!(value["badge"], "PM Ace");

        let back: Attempt = serde_json::from_value(value).unwrap();
        assert_eq!(back, attempt);
    }

    #[test]
    fn sub_millisecond_timestamp_survives_json() {
        let at = fixed_now() + chrono::Duration::nanoseconds(123_456_789);
        let attempt = Attempt::new(TopicId::new("t"), "T", 3, 5, at).unwrap();
        assert_eq!(attempt.completed_at().timestamp_subsec_nanos(), 123_000_000);

        let raw = serde_json::to_string(&attempt).unwrap();
        assert!(raw.contains("2023-11-14T22:13:20.123Z"), "{raw}");
        let back: Attempt = serde_json::from_str(&raw).unwrap();
        assert_eq!(back, attempt);
    }

    #[test]
    fn deserializing_invalid_record_fails() {
        let raw = r#"{"topicId":"t","topicTitle":"T","score":5,"total":3,"percent":100,
            "timestampISO":"2023-11-14T22:13:20.000Z","badge":"PM Ace"}"#;
        assert!(serde_json::from_str::<Attempt>(raw).is_err());
    }
}
