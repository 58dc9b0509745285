use thiserror::Error;

use crate::bank::BankError;
use crate::model::{AttemptError, TopicError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Topic(#[from] TopicError),
    #[error(transparent)]
    Attempt(#[from] AttemptError),
    #[error(transparent)]
    Bank(#[from] BankError),
}
