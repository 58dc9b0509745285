use quiz_core::model::{Attempt, Badge, TopicSummary};
use services::QuestionView;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TopicOptionVm {
    pub id: String,
    pub title: String,
}

#[must_use]
pub fn map_topic_options(summaries: &[TopicSummary]) -> Vec<TopicOptionVm> {
    summaries
        .iter()
        .map(|summary| TopicOptionVm {
            id: summary.id.as_str().to_owned(),
            title: summary.title.clone(),
        })
        .collect()
}

/// The "start the quiz" card for the selected topic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StartCardVm {
    pub title: String,
    pub reference_url: String,
    pub question_count_label: String,
}

impl From<&TopicSummary> for StartCardVm {
    fn from(summary: &TopicSummary) -> Self {
        let noun = if summary.question_count == 1 {
            "question"
        } else {
            "questions"
        };
        Self {
            title: summary.title.clone(),
            reference_url: summary.reference_url.clone(),
            question_count_label: format!("{} {noun}", summary.question_count),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionVm {
    pub index: usize,
    pub label: String,
    pub selected: bool,
}

/// The question on screen. Which option is correct is deliberately absent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionCardVm {
    pub counter_label: String,
    pub progress_label: String,
    pub progress_percent: u32,
    pub prompt: String,
    pub options: Vec<OptionVm>,
    pub can_go_back: bool,
    pub can_advance: bool,
    pub next_label: &'static str,
}

impl From<&QuestionView> for QuestionCardVm {
    fn from(view: &QuestionView) -> Self {
        let progress = view.progress;
        let options = view
            .options
            .iter()
            .enumerate()
            .map(|(index, label)| OptionVm {
                index,
                label: label.clone(),
                selected: view.selection == Some(index),
            })
            .collect();

        Self {
            counter_label: format!("Question {}/{}", progress.number(), progress.total),
            progress_label: format!("Progress {}%", progress.percent),
            progress_percent: progress.percent,
            prompt: view.prompt.clone(),
            options,
            can_go_back: progress.index > 0,
            can_advance: view.selection.is_some(),
            next_label: if progress.is_last {
                "Finish 🎉"
            } else {
                "Next →"
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BadgeVm {
    pub label: &'static str,
    pub emoji: &'static str,
    /// CSS modifier, e.g. `badge--amber`.
    pub tone_class: String,
}

impl BadgeVm {
    #[must_use]
    pub fn for_percent(percent: u32) -> Self {
        Self::from(Badge::for_percent(percent))
    }
}

impl From<Badge> for BadgeVm {
    fn from(badge: Badge) -> Self {
        Self {
            label: badge.label(),
            emoji: badge.emoji(),
            tone_class: format!("badge--{}", badge.tone()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub heading: String,
    pub score_label: String,
    pub percent_label: String,
    pub badge: BadgeVm,
}

impl From<&Attempt> for ResultVm {
    fn from(attempt: &Attempt) -> Self {
        Self {
            heading: format!("Result • {}", attempt.topic_title()),
            score_label: format!("Score: {}/{}", attempt.score(), attempt.total()),
            percent_label: format!("{}%", attempt.percent()),
            badge: BadgeVm::for_percent(attempt.percent()),
        }
    }
}
