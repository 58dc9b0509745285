mod attempt_vm;
mod quiz_vm;
mod time_fmt;

pub use attempt_vm::{AttemptRowVm, map_attempt_rows};
pub use quiz_vm::{
    BadgeVm, OptionVm, QuestionCardVm, ResultVm, StartCardVm, TopicOptionVm, map_topic_options,
};
pub use time_fmt::{format_datetime, format_datetime_in};
