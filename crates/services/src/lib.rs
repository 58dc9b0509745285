#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod sessions;

pub use quiz_core::{Clock, RandomSource};
pub use sessions as session;

pub use app_services::AppServices;
pub use error::{AppServicesError, SessionError};

pub use sessions::{
    AttemptHistoryService, AttemptListItem, QuizIntent, QuizLoopService, QuizPhase,
    QuizProgress, QuizSession, QuestionView, QuizStep, Rejection, SaveOutcome, Transition,
};
