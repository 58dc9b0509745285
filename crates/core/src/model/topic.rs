use std::collections::HashSet;

use thiserror::Error;
use url::Url;

use crate::model::TopicId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TopicError {
    #[error("topic id cannot be empty")]
    EmptyId,

    #[error("topic {id} has an empty title")]
    EmptyTitle { id: TopicId },

    #[error("topic {id} has an invalid reference URL: {raw}")]
    InvalidReferenceUrl { id: TopicId, raw: String },

    #[error("question prompt cannot be empty")]
    EmptyPrompt,

    #[error("question \"{prompt}\" repeats option text \"{option}\"")]
    DuplicateOption { prompt: String, option: String },
}

//
// ─── RAW QUESTION ──────────────────────────────────────────────────────────────
//

/// Authoring-time question with an explicit correct answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawQuestion {
    prompt: String,
    correct: String,
    incorrect: Vec<String>,
    explanation: String,
}

impl RawQuestion {
    /// # Errors
    ///
    /// Returns `TopicError::EmptyPrompt` for a blank prompt and
    /// `TopicError::DuplicateOption` when two options share the same text.
    pub fn new(
        prompt: impl Into<String>,
        correct: impl Into<String>,
        incorrect: Vec<String>,
        explanation: impl Into<String>,
    ) -> Result<Self, TopicError> {
        let prompt = prompt.into();
        let correct = correct.into();
        if prompt.trim().is_empty() {
            return Err(TopicError::EmptyPrompt);
        }

        let mut seen = HashSet::with_capacity(incorrect.len() + 1);
        for option in std::iter::once(&correct).chain(incorrect.iter()) {
            if !seen.insert(option.as_str()) {
                return Err(TopicError::DuplicateOption {
                    prompt,
                    option: option.clone(),
                });
            }
        }

        Ok(Self {
            prompt,
            correct,
            incorrect,
            explanation: explanation.into(),
        })
    }

    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    #[must_use]
    pub fn correct(&self) -> &str {
        &self.correct
    }

    #[must_use]
    pub fn incorrect(&self) -> &[String] {
        &self.incorrect
    }

    #[must_use]
    pub fn explanation(&self) -> &str {
        &self.explanation
    }

    /// Correct option followed by the incorrect ones, in authoring order.
    #[must_use]
    pub fn options(&self) -> Vec<String> {
        let mut options = Vec::with_capacity(self.incorrect.len() + 1);
        options.push(self.correct.clone());
        options.extend(self.incorrect.iter().cloned());
        options
    }
}

//
// ─── TOPIC ─────────────────────────────────────────────────────────────────────
//

/// A subject area and its questions. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Topic {
    id: TopicId,
    title: String,
    reference_url: String,
    document_url: String,
    questions: Vec<RawQuestion>,
}

impl Topic {
    /// # Errors
    ///
    /// Returns `TopicError` when the id or title is blank or the reference URL
    /// is not an absolute URL.
    pub fn new(
        id: TopicId,
        title: impl Into<String>,
        reference_url: impl Into<String>,
        document_url: impl Into<String>,
        questions: Vec<RawQuestion>,
    ) -> Result<Self, TopicError> {
        if id.is_empty() {
            return Err(TopicError::EmptyId);
        }
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(TopicError::EmptyTitle { id });
        }
        let reference_url = reference_url.into();
        if Url::parse(&reference_url).is_err() {
            return Err(TopicError::InvalidReferenceUrl {
                id,
                raw: reference_url,
            });
        }

        Ok(Self {
            id,
            title,
            reference_url,
            document_url: document_url.into(),
            questions,
        })
    }

    #[must_use]
    pub fn id(&self) -> &TopicId {
        &self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn reference_url(&self) -> &str {
        &self.reference_url
    }

    /// Companion document; may be a path relative to the app's assets.
    #[must_use]
    pub fn document_url(&self) -> &str {
        &self.document_url
    }

    #[must_use]
    pub fn questions(&self) -> &[RawQuestion] {
        &self.questions
    }

    #[must_use]
    pub fn summary(&self) -> TopicSummary {
        TopicSummary {
            id: self.id.clone(),
            title: self.title.clone(),
            reference_url: self.reference_url.clone(),
            document_url: self.document_url.clone(),
            question_count: self.questions.len(),
        }
    }
}

/// Topic listing entry for pickers. Carries no questions so answers are not
/// exposed before a quiz starts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopicSummary {
    pub id: TopicId,
    pub title: String,
    pub reference_url: String,
    pub document_url: String,
    pub question_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wrong(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    #[test]
    fn rejects_correct_text_repeated_as_wrong_option() {
        let err = RawQuestion::new("Q", "A", wrong(&["B", "A"]), "").unwrap_err();
        assert!(matches!(err, TopicError::DuplicateOption { option, .. } if option == "A"));
    }

    #[test]
    fn rejects_repeated_wrong_options() {
        let err = RawQuestion::new("Q", "A", wrong(&["B", "B"]), "").unwrap_err();
        assert!(matches!(err, TopicError::DuplicateOption { .. }));
    }

    #[test]
    fn question_without_wrong_options_is_allowed() {
        let q = RawQuestion::new("Q", "A", Vec::new(), "why").unwrap();
        assert_eq!(q.options(), vec!["A".to_owned()]);
    }

    #[test]
    fn topic_requires_absolute_reference_url() {
        let err = Topic::new(TopicId::new("t"), "T", "/relative", "/doc.pdf", Vec::new())
            .unwrap_err();
        assert!(matches!(err, TopicError::InvalidReferenceUrl { .. }));
    }

    #[test]
    fn summary_hides_questions() {
        let q = RawQuestion::new("Q", "A", wrong(&["B"]), "").unwrap();
        let topic = Topic::new(
            TopicId::new("t"),
            "  Title ",
            "https://example.com/post",
            "/pdfs/t.pdf",
            vec![q],
        )
        .unwrap();
        let summary = topic.summary();
        assert_eq!(summary.title, "Title");
        assert_eq!(summary.question_count, 1);
        assert_eq!(summary.document_url, "/pdfs/t.pdf");
    }
}
