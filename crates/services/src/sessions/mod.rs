mod progress;
mod service;
mod view;
mod workflow;

// Public API of the quiz session subsystem.
pub use crate::error::SessionError;
pub use progress::QuizProgress;
pub use service::{QuestionView, QuizIntent, QuizPhase, QuizSession, Rejection, Transition};
pub use view::{AttemptHistoryService, AttemptListItem};
pub use workflow::{QuizLoopService, QuizStep, SaveOutcome};
