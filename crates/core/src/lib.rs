#![forbid(unsafe_code)]

pub mod bank;
pub mod builder;
pub mod error;
pub mod model;
pub mod random;
pub mod score;
pub mod time;

pub use bank::{BankError, QuestionBank};
pub use builder::build_quiz;
pub use error::Error;
pub use random::RandomSource;
pub use time::Clock;
