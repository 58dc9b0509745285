//! The static question bank.
//!
//! Topics ship as `data/topics.json` and are embedded at compile time.
//! Adding a topic means appending an entry to that file.

use std::collections::HashSet;

use serde::Deserialize;
use thiserror::Error;

use crate::model::{RawQuestion, Topic, TopicError, TopicId, TopicSummary};

const BUILTIN_TOPICS: &str = include_str!("../data/topics.json");

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("question bank is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Topic(#[from] TopicError),

    #[error("duplicate topic id: {0}")]
    DuplicateTopic(TopicId),
}

#[derive(Debug, Deserialize)]
struct BankFile {
    topics: Vec<TopicEntry>,
}

#[derive(Debug, Deserialize)]
struct TopicEntry {
    id: String,
    title: String,
    reference_url: String,
    document_url: String,
    #[serde(default)]
    questions: Vec<QuestionEntry>,
}

#[derive(Debug, Deserialize)]
struct QuestionEntry {
    prompt: String,
    correct: String,
    #[serde(default)]
    incorrect: Vec<String>,
    #[serde(default)]
    explanation: String,
}

impl TopicEntry {
    fn into_topic(self) -> Result<Topic, TopicError> {
        let questions = self
            .questions
            .into_iter()
            .map(|q| RawQuestion::new(q.prompt, q.correct, q.incorrect, q.explanation))
            .collect::<Result<Vec<_>, _>>()?;
        Topic::new(
            TopicId::new(self.id),
            self.title,
            self.reference_url,
            self.document_url,
            questions,
        )
    }
}

/// Ordered, validated collection of topics.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QuestionBank {
    topics: Vec<Topic>,
}

impl QuestionBank {
    /// # Errors
    ///
    /// Returns `BankError::DuplicateTopic` if two topics share an id.
    pub fn new(topics: Vec<Topic>) -> Result<Self, BankError> {
        let mut seen = HashSet::with_capacity(topics.len());
        for topic in &topics {
            if !seen.insert(topic.id()) {
                return Err(BankError::DuplicateTopic(topic.id().clone()));
            }
        }
        Ok(Self { topics })
    }

    /// Parse and validate a bank from its JSON representation.
    ///
    /// # Errors
    ///
    /// Returns `BankError` for malformed JSON or invalid topics/questions.
    pub fn from_json(raw: &str) -> Result<Self, BankError> {
        let file: BankFile = serde_json::from_str(raw)?;
        let topics = file
            .topics
            .into_iter()
            .map(TopicEntry::into_topic)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(topics)
    }

    /// The bank compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `BankError` if the embedded data is invalid.
    pub fn builtin() -> Result<Self, BankError> {
        Self::from_json(BUILTIN_TOPICS)
    }

    #[must_use]
    pub fn topics(&self) -> &[Topic] {
        &self.topics
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.topics.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.topics.is_empty()
    }

    #[must_use]
    pub fn get(&self, id: &TopicId) -> Option<&Topic> {
        self.topics.iter().find(|topic| topic.id() == id)
    }

    /// Picker entries for every topic, in bank order.
    #[must_use]
    pub fn summaries(&self) -> Vec<TopicSummary> {
        self.topics.iter().map(Topic::summary).collect()
    }

    /// Topics whose title contains `query`, ignoring case. A blank query
    /// matches everything.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<TopicSummary> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return self.summaries();
        }
        self.topics
            .iter()
            .filter(|topic| topic.title().to_lowercase().contains(&needle))
            .map(Topic::summary)
            .collect()
    }

    /// The only topic's id when the bank holds exactly one topic.
    #[must_use]
    pub fn sole_topic(&self) -> Option<&TopicId> {
        match self.topics.as_slice() {
            [only] => Some(only.id()),
            _ => None,
        }
    }
}
