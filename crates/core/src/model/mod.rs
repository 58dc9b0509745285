mod attempt;
mod badge;
mod ids;
mod question;
mod topic;

pub use attempt::{Attempt, AttemptError};
pub use badge::{Badge, badge_for};
pub use ids::TopicId;
pub use question::QuizQuestion;
pub use topic::{RawQuestion, Topic, TopicError, TopicSummary};
