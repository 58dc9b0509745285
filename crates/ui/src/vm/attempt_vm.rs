use services::AttemptListItem;

use crate::vm::quiz_vm::BadgeVm;
use crate::vm::time_fmt::format_datetime;

/// One row of an attempt history list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AttemptRowVm {
    pub topic_title: String,
    pub completed_at_str: String,
    pub score_label: String,
    pub percent_label: String,
    pub badge: BadgeVm,
}

impl From<&AttemptListItem> for AttemptRowVm {
    fn from(item: &AttemptListItem) -> Self {
        Self {
            topic_title: item.topic_title.clone(),
            completed_at_str: format_datetime(item.completed_at),
            score_label: format!("{}/{}", item.score, item.total),
            percent_label: format!("({}%)", item.percent),
            badge: BadgeVm::for_percent(item.percent),
        }
    }
}

#[must_use]
pub fn map_attempt_rows(items: &[AttemptListItem]) -> Vec<AttemptRowVm> {
    items.iter().map(AttemptRowVm::from).collect()
}
