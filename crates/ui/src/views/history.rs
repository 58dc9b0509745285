use dioxus::prelude::*;

use crate::context::AppContext;
use crate::views::{ViewState, view_state_from_resource};
use crate::vm::{AttemptRowVm, map_attempt_rows};

#[component]
pub fn HistoryView() -> Element {
    let ctx = use_context::<AppContext>();
    let history = ctx.history();

    let resource = use_resource(move || {
        let history = history.clone();
        async move {
            let items = history.load().await;
            map_attempt_rows(&items)
        }
    });

    let state = view_state_from_resource(&resource);

    rsx! {
        div { class: "page",
            h2 { "Attempt history" }
            p { class: "page__hint", "Every attempt saved on this device, newest first." }

            match state {
                ViewState::Idle => rsx! {
                    p { "Idle" }
                },
                ViewState::Loading => rsx! {
                    p { "Loading..." }
                },
                ViewState::Ready(rows) => rsx! {
                    if rows.is_empty() {
                        p { class: "empty", "No attempts yet. Finish a quiz to see it here." }
                    } else {
                        ul { class: "attempt-list",
                            for row in rows {
                                AttemptRow { row, show_topic: true }
                            }
                        }
                    }
                },
            }
        }
    }
}

#[component]
pub(crate) fn AttemptRow(row: AttemptRowVm, show_topic: bool) -> Element {
    rsx! {
        li { class: "attempt-row",
            div { class: "attempt-row__meta",
                if show_topic {
                    span { class: "attempt-row__topic", "{row.topic_title}" }
                }
                span { class: "attempt-row__date", "{row.completed_at_str}" }
            }
            div { class: "attempt-row__score",
                "{row.score_label} "
                span { class: "attempt-row__percent", "{row.percent_label}" }
                span { class: "badge-pill {row.badge.tone_class}", "{row.badge.emoji} {row.badge.label}" }
            }
        }
    }
}
