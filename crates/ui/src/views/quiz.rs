use dioxus::prelude::*;

use quiz_core::model::TopicId;
use services::{QuizIntent, QuizPhase, SaveOutcome, Transition};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::views::history::AttemptRow;
use crate::vm::{
    OptionVm, QuestionCardVm, ResultVm, StartCardVm, map_attempt_rows, map_topic_options,
};

#[cfg(test)]
use services::QuizSession;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

/// Attempts shown under the result card.
const TOPIC_HISTORY_LIMIT: usize = 10;

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let quiz_loop = ctx.quiz_loop();
    let history = ctx.history();
    let bank = ctx.bank();

    let session = use_signal({
        let quiz_loop = quiz_loop.clone();
        move || quiz_loop.new_session()
    });
    let mut query = use_signal(String::new);
    let save_status = use_signal(|| SaveOutcome::NotNeeded);

    let selected_topic = use_memo(move || session.read().selected_topic_id().cloned());
    let topic_history = use_resource(move || {
        let history = history.clone();
        let topic = selected_topic();
        async move {
            let Some(topic) = topic else {
                return Vec::new();
            };
            let items = history.attempts_for_topic(&topic, TOPIC_HISTORY_LIMIT).await;
            map_attempt_rows(&items)
        }
    });

    let dispatch_intent = use_callback(move |intent: QuizIntent| {
        let mut session = session;
        let mut save_status = save_status;
        let transition = session.write().apply(intent);
        if !matches!(transition, Transition::Completed(_)) {
            return;
        }
        save_status.set(SaveOutcome::NotNeeded);
        let quiz_loop = quiz_loop.clone();
        spawn(async move {
            let mut topic_history = topic_history;
            let outcome = quiz_loop.persist(&transition).await;
            save_status.set(outcome);
            topic_history.restart();
        });
    });

    let retry_save = use_callback(move |()| {
        let Some(attempt) = session.peek().result().cloned() else {
            return;
        };
        let quiz_loop = ctx.quiz_loop();
        spawn(async move {
            let mut save_status = save_status;
            let mut topic_history = topic_history;
            let outcome = match quiz_loop.retry_save(&attempt).await {
                Ok(()) => SaveOutcome::Saved,
                Err(_) => SaveOutcome::Failed,
            };
            save_status.set(outcome);
            topic_history.restart();
        });
    });

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<QuizTestHandles>() {
                handles.register(dispatch_intent, retry_save, session);
            }
        }
    }

    let show_search = bank.len() > 1;
    let topic_options = map_topic_options(&bank.search(&query.read()));

    let current = session.read();
    let phase = current.phase();
    let selected_id = current
        .selected_topic_id()
        .map(|id| id.as_str().to_owned())
        .unwrap_or_default();
    let start_card = current
        .selected_topic()
        .map(|topic| StartCardVm::from(&topic.summary()));
    let question = current.question_view().map(|view| QuestionCardVm::from(&view));
    let result = current.result().map(ResultVm::from);
    drop(current);

    let topic_rows = topic_history.read().clone().unwrap_or_default();
    let save_error = (save_status() == SaveOutcome::Failed).then_some(ViewError::SaveFailed);
    let placeholder = if bank.len() == 1 {
        "Topic selected"
    } else {
        "Choose a topic"
    };

    rsx! {
        div { class: "page quiz-page",
            section { class: "hero",
                span { class: "hero__tag", "Learn → Quiz → Score → Repeat" }
                h1 { class: "hero__title", "PM Quiz Studio" }
                p { class: "hero__lead",
                    "Short, educational MCQs. "
                    strong { "No login." }
                }

                div { class: "hero__cards",
                    div { class: "card",
                        div { class: "card__step", "1) Select a topic" }
                        if show_search {
                            input {
                                class: "topic-search",
                                placeholder: "Search topics…",
                                value: "{query}",
                                oninput: move |evt: FormEvent| query.set(evt.value()),
                            }
                        }
                        select {
                            class: "topic-select",
                            value: "{selected_id}",
                            onchange: move |evt: FormEvent| {
                                dispatch_intent.call(QuizIntent::SelectTopic(TopicId::new(evt.value())));
                            },
                            option { value: "", disabled: true, selected: selected_id.is_empty(), "{placeholder}" }
                            for topic in topic_options {
                                option {
                                    value: "{topic.id}",
                                    selected: topic.id == selected_id,
                                    "{topic.title}"
                                }
                            }
                        }
                        if let Some(card) = start_card.clone() {
                            a {
                                class: "topic-link",
                                href: "{card.reference_url}",
                                target: "_blank",
                                "📌 Open reference post"
                            }
                        }
                    }

                    div { class: "card",
                        div { class: "card__step", "2) Start the quiz" }
                        p { class: "card__lead", "Learn . Test . Improve" }
                        match start_card {
                            Some(card) => rsx! {
                                div { class: "tags",
                                    span { class: "tag tag--indigo", "{card.question_count_label}" }
                                    span { class: "tag tag--fuchsia", "Unlimited retries" }
                                    span { class: "tag tag--emerald", "Attempt history" }
                                }
                            },
                            None => rsx! {
                                p { class: "card__hint", "Select a topic to unlock the quiz." }
                            },
                        }
                        button {
                            class: "cta",
                            id: "quiz-start",
                            r#type: "button",
                            disabled: phase == QuizPhase::Idle,
                            onclick: move |_| dispatch_intent.call(QuizIntent::Start),
                            "▶ Start Quiz"
                        }
                        p { class: "card__note", "Attempts are saved on this device." }
                    }
                }
            }

            section { class: "quiz-area",
                match (phase, question, result) {
                    (QuizPhase::InProgress, Some(card), _) => rsx! {
                        QuestionCard { card, on_intent: dispatch_intent }
                    },
                    (QuizPhase::Completed, _, Some(result)) => rsx! {
                        ResultCard {
                            result,
                            save_error,
                            on_intent: dispatch_intent,
                            on_retry_save: retry_save,
                        }
                        div { class: "card topic-history",
                            div { class: "card__step", "Attempt history" }
                            p { class: "card__hint",
                                "Last {topic_rows.len()} attempts on this device"
                            }
                            if topic_rows.is_empty() {
                                p { class: "empty", "No attempts yet." }
                            } else {
                                ul { class: "attempt-list",
                                    for row in topic_rows {
                                        AttemptRow { row, show_topic: false }
                                    }
                                }
                            }
                        }
                        p { class: "card__note", "Note: attempt history is saved locally (no login)." }
                    },
                    (QuizPhase::Ready, _, _) => rsx! {
                        p { class: "quiz-area__hint", "Press Start Quiz when you are ready." }
                    },
                    _ => rsx! {
                        p { class: "quiz-area__hint", "Pick a topic to begin." }
                    },
                }
            }
        }
    }
}

#[component]
fn QuestionCard(card: QuestionCardVm, on_intent: EventHandler<QuizIntent>) -> Element {
    rsx! {
        div { class: "card question-card",
            div { class: "question-card__header",
                span { class: "question-card__counter",
                    strong { "{card.counter_label}" }
                    " • {card.progress_label}"
                }
            }
            div { class: "progress",
                div { class: "progress__bar", style: "width: {card.progress_percent}%" }
            }
            h3 { class: "question-card__prompt", "{card.prompt}" }
            div { class: "options",
                for option in card.options {
                    OptionButton { option, on_intent }
                }
            }
            div { class: "question-card__nav",
                button {
                    class: "nav-back",
                    id: "quiz-back",
                    r#type: "button",
                    disabled: !card.can_go_back,
                    onclick: move |_| on_intent.call(QuizIntent::Back),
                    "Back"
                }
                button {
                    class: "nav-next",
                    id: "quiz-next",
                    r#type: "button",
                    disabled: !card.can_advance,
                    onclick: move |_| on_intent.call(QuizIntent::Next),
                    "{card.next_label}"
                }
            }
        }
    }
}

#[component]
fn OptionButton(option: OptionVm, on_intent: EventHandler<QuizIntent>) -> Element {
    let index = option.index;
    let class = if option.selected {
        "option option--selected"
    } else {
        "option"
    };
    rsx! {
        button {
            class: "{class}",
            r#type: "button",
            onclick: move |_| on_intent.call(QuizIntent::SelectOption(index)),
            div { class: "option__row",
                span { class: "option__label", "{option.label}" }
                span { class: "option__check", aria_hidden: "true", "✓" }
            }
            if option.selected {
                div { class: "option__selected", "Selected" }
            }
        }
    }
}

#[component]
fn ResultCard(
    result: ResultVm,
    save_error: Option<ViewError>,
    on_intent: EventHandler<QuizIntent>,
    on_retry_save: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "card result-card",
            div { class: "result-card__heading", "{result.heading}" }
            div { class: "result-card__badge",
                span { class: "result-card__emoji", "{result.badge.emoji}" }
                span { class: "result-card__title {result.badge.tone_class}", "{result.badge.label}" }
            }
            p { class: "result-card__score",
                strong { "{result.score_label}" }
                " • {result.percent_label}"
            }
            div { class: "result-card__pill",
                span { "Badge:" }
                span { class: "badge-pill {result.badge.tone_class}", "{result.badge.label}" }
            }
            if let Some(err) = save_error {
                div { class: "result-card__error",
                    p { "{err.message()}" }
                    button {
                        r#type: "button",
                        onclick: move |_| on_retry_save.call(()),
                        "Retry save"
                    }
                }
            }
            div { class: "result-card__actions",
                button {
                    class: "cta",
                    id: "quiz-retry",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::Start),
                    "Retry"
                }
                button {
                    class: "cta cta--ghost",
                    id: "quiz-back-to-start",
                    r#type: "button",
                    onclick: move |_| on_intent.call(QuizIntent::BackToStart),
                    "Back to start"
                }
            }
        }
    }
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    retry_save: Rc<RefCell<Option<Callback<()>>>>,
    session: Rc<RefCell<Option<Signal<QuizSession>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(
        &self,
        dispatch: Callback<QuizIntent>,
        retry_save: Callback<()>,
        session: Signal<QuizSession>,
    ) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.retry_save.borrow_mut() = Some(retry_save);
        *self.session.borrow_mut() = Some(session);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn retry_save(&self) -> Callback<()> {
        (*self.retry_save.borrow()).expect("retry save registered")
    }

    pub(crate) fn session(&self) -> Signal<QuizSession> {
        (*self.session.borrow()).expect("quiz session registered")
    }
}
