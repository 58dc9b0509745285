use std::fmt;
use std::sync::Arc;

use rand::rngs::StdRng;

use quiz_core::model::{Attempt, QuizQuestion, Topic, TopicId};
use quiz_core::{Clock, QuestionBank, RandomSource, build_quiz};

use super::progress::QuizProgress;

//
// ─── INTENTS AND TRANSITIONS ───────────────────────────────────────────────────
//

/// A discrete user action driving the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizIntent {
    /// Pick a topic. Always discards the current run.
    SelectTopic(TopicId),
    /// Build a fresh randomized quiz for the selected topic. Also used for retry.
    Start,
    /// Tentatively choose an option on the current question.
    SelectOption(usize),
    Back,
    /// Commit the tentative choice; finishes the quiz on the last question.
    Next,
    /// Leave the results screen and return to the topic's start card.
    BackToStart,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    /// No topic selected.
    Idle,
    /// Topic selected, quiz not built yet.
    Ready,
    InProgress,
    Completed,
}

/// Why an intent left the session untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    UnknownTopic,
    NoTopic,
    NotInProgress,
    NotCompleted,
    OptionOutOfRange,
    AtFirstQuestion,
    NoSelection,
    InvalidScore,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Ignored(Rejection),
    Updated,
    /// The quiz finished; the attempt should be persisted.
    Completed(Attempt),
}

/// Current question as the UI may show it. The answer index is withheld.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionView {
    pub prompt: String,
    pub options: Vec<String>,
    pub explanation: String,
    pub selection: Option<usize>,
    pub progress: QuizProgress,
}

//
// ─── STATE ─────────────────────────────────────────────────────────────────────
//

struct Run {
    questions: Vec<QuizQuestion>,
    index: usize,
    selection: Option<usize>,
    answers: Vec<Option<usize>>,
}

impl Run {
    fn new(questions: Vec<QuizQuestion>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            index: 0,
            selection: None,
            answers,
        }
    }

    fn current(&self) -> Option<&QuizQuestion> {
        self.questions.get(self.index)
    }

    fn is_last(&self) -> bool {
        self.index + 1 >= self.questions.len()
    }

    /// Recomputed from every committed answer, so answers changed via `Back`
    /// count exactly once.
    fn score(&self) -> u32 {
        let correct = self
            .questions
            .iter()
            .zip(&self.answers)
            .filter(|(question, answer)| answer.is_some_and(|choice| question.is_correct(choice)))
            .count();
        u32::try_from(correct).unwrap_or(u32::MAX)
    }

    fn total(&self) -> u32 {
        u32::try_from(self.questions.len()).unwrap_or(u32::MAX)
    }
}

enum State {
    Idle,
    Ready {
        topic: TopicId,
    },
    InProgress {
        topic: TopicId,
        run: Run,
    },
    Completed {
        topic: TopicId,
        run: Run,
        attempt: Attempt,
    },
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// In-memory quiz session: one topic, one randomized run at a time.
///
/// All changes go through [`QuizSession::apply`]. Persistence is left to the
/// caller, which receives the finished attempt in `Transition::Completed`.
pub struct QuizSession {
    bank: Arc<QuestionBank>,
    clock: Clock,
    rng: StdRng,
    state: State,
}

impl QuizSession {
    /// Start a session over `bank`. A bank with a single topic starts with
    /// that topic already selected.
    #[must_use]
    pub fn new(bank: Arc<QuestionBank>, clock: Clock, random: RandomSource) -> Self {
        let state = match bank.sole_topic() {
            Some(topic) => State::Ready {
                topic: topic.clone(),
            },
            None => State::Idle,
        };
        Self {
            bank,
            clock,
            rng: random.rng(),
            state,
        }
    }

    /// Apply one intent and report what happened.
    pub fn apply(&mut self, intent: QuizIntent) -> Transition {
        let state = std::mem::replace(&mut self.state, State::Idle);
        let (next, transition) = self.transition(state, intent);
        self.state = next;
        if let Transition::Ignored(reason) = transition {
            tracing::debug!(?reason, "quiz intent ignored");
        }
        transition
    }

    fn transition(&mut self, state: State, intent: QuizIntent) -> (State, Transition) {
        match (state, intent) {
            (_, QuizIntent::SelectTopic(topic)) => {
                if self.bank.get(&topic).is_some() {
                    (State::Ready { topic }, Transition::Updated)
                } else {
                    (State::Idle, Transition::Ignored(Rejection::UnknownTopic))
                }
            }

            (State::Idle, QuizIntent::Start) => {
                (State::Idle, Transition::Ignored(Rejection::NoTopic))
            }
            (
                State::Ready { topic }
                | State::InProgress { topic, .. }
                | State::Completed { topic, .. },
                QuizIntent::Start,
            ) => self.start(topic),

            (State::InProgress { topic, mut run }, QuizIntent::SelectOption(option)) => {
                let option_count = run.current().map_or(0, QuizQuestion::option_count);
                if option >= option_count {
                    return (
                        State::InProgress { topic, run },
                        Transition::Ignored(Rejection::OptionOutOfRange),
                    );
                }
                run.selection = Some(option);
                (State::InProgress { topic, run }, Transition::Updated)
            }

            (State::InProgress { topic, mut run }, QuizIntent::Back) => {
                if run.index == 0 {
                    return (
                        State::InProgress { topic, run },
                        Transition::Ignored(Rejection::AtFirstQuestion),
                    );
                }
                run.index -= 1;
                let restored = run.answers.get(run.index).copied().flatten();
                // Forward traversal commits every earlier answer.
                debug_assert!(restored.is_some(), "no committed answer at {}", run.index);
                if restored.is_none() {
                    tracing::warn!(index = run.index, "no committed answer for previous question");
                }
                run.selection = restored;
                (State::InProgress { topic, run }, Transition::Updated)
            }

            (State::InProgress { topic, mut run }, QuizIntent::Next) => {
                let Some(choice) = run.selection else {
                    return (
                        State::InProgress { topic, run },
                        Transition::Ignored(Rejection::NoSelection),
                    );
                };
                if let Some(slot) = run.answers.get_mut(run.index) {
                    *slot = Some(choice);
                }
                if run.is_last() {
                    return self.complete(topic, run);
                }
                run.index += 1;
                run.selection = None;
                (State::InProgress { topic, run }, Transition::Updated)
            }

            (State::Completed { topic, .. }, QuizIntent::BackToStart) => {
                (State::Ready { topic }, Transition::Updated)
            }

            (
                state @ (State::Idle | State::Ready { .. } | State::Completed { .. }),
                QuizIntent::SelectOption(_) | QuizIntent::Back | QuizIntent::Next,
            ) => (state, Transition::Ignored(Rejection::NotInProgress)),

            (
                state @ (State::Idle | State::Ready { .. } | State::InProgress { .. }),
                QuizIntent::BackToStart,
            ) => (state, Transition::Ignored(Rejection::NotCompleted)),
        }
    }

    fn start(&mut self, topic: TopicId) -> (State, Transition) {
        let Some(source) = self.bank.get(&topic) else {
            return (State::Idle, Transition::Ignored(Rejection::UnknownTopic));
        };
        let run = Run::new(build_quiz(&mut self.rng, source.questions()));
        tracing::debug!(%topic, questions = run.questions.len(), "quiz started");

        // Nothing to answer: finish right away with 0/0.
        if run.questions.is_empty() {
            return self.complete(topic, run);
        }
        (State::InProgress { topic, run }, Transition::Updated)
    }

    fn complete(&self, topic: TopicId, run: Run) -> (State, Transition) {
        let title = self
            .bank
            .get(&topic)
            .map_or_else(|| topic.to_string(), |t| t.title().to_owned());

        let attempt = match Attempt::new(
            topic.clone(),
            title,
            run.score(),
            run.total(),
            self.clock.now(),
        ) {
            Ok(attempt) => attempt,
            Err(err) => {
                tracing::error!(%err, "could not record attempt");
                return (
                    State::InProgress { topic, run },
                    Transition::Ignored(Rejection::InvalidScore),
                );
            }
        };

        tracing::info!(
            %topic,
            score = attempt.score(),
            total = attempt.total(),
            badge = attempt.badge(),
            "quiz completed"
        );
        (
            State::Completed {
                topic,
                run,
                attempt: attempt.clone(),
            },
            Transition::Completed(attempt),
        )
    }

    //
    // ─── READ MODEL ────────────────────────────────────────────────────────────
    //

    #[must_use]
    pub fn phase(&self) -> QuizPhase {
        match self.state {
            State::Idle => QuizPhase::Idle,
            State::Ready { .. } => QuizPhase::Ready,
            State::InProgress { .. } => QuizPhase::InProgress,
            State::Completed { .. } => QuizPhase::Completed,
        }
    }

    #[must_use]
    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    #[must_use]
    pub fn selected_topic_id(&self) -> Option<&TopicId> {
        match &self.state {
            State::Idle => None,
            State::Ready { topic }
            | State::InProgress { topic, .. }
            | State::Completed { topic, .. } => Some(topic),
        }
    }

    #[must_use]
    pub fn selected_topic(&self) -> Option<&Topic> {
        self.selected_topic_id().and_then(|id| self.bank.get(id))
    }

    fn run(&self) -> Option<&Run> {
        match &self.state {
            State::InProgress { run, .. } | State::Completed { run, .. } => Some(run),
            State::Idle | State::Ready { .. } => None,
        }
    }

    /// Questions of the active or just-finished run.
    #[must_use]
    pub fn questions(&self) -> &[QuizQuestion] {
        self.run()
            .map(|run| run.questions.as_slice())
            .unwrap_or_default()
    }

    /// Committed answers by question position; `None` until answered.
    #[must_use]
    pub fn answers(&self) -> &[Option<usize>] {
        self.run()
            .map(|run| run.answers.as_slice())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        match &self.state {
            State::InProgress { run, .. } => run.current(),
            _ => None,
        }
    }

    /// Tentative choice for the current question.
    #[must_use]
    pub fn selection(&self) -> Option<usize> {
        match &self.state {
            State::InProgress { run, .. } => run.selection,
            _ => None,
        }
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        match &self.state {
            State::InProgress { run, .. } => QuizProgress::new(run.index, run.questions.len()),
            State::Completed { run, .. } => {
                let total = run.questions.len();
                QuizProgress::new(total.saturating_sub(1), total)
            }
            State::Idle | State::Ready { .. } => QuizProgress::new(0, 0),
        }
    }

    #[must_use]
    pub fn question_view(&self) -> Option<QuestionView> {
        let question = self.current_question()?;
        Some(QuestionView {
            prompt: question.prompt().to_owned(),
            options: question.options().to_vec(),
            explanation: question.explanation().to_owned(),
            selection: self.selection(),
            progress: self.progress(),
        })
    }

    /// The attempt produced by the last completed run.
    #[must_use]
    pub fn result(&self) -> Option<&Attempt> {
        match &self.state {
            State::Completed { attempt, .. } => Some(attempt),
            _ => None,
        }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("phase", &self.phase())
            .field("topic", &self.selected_topic_id())
            .field("questions_len", &self.questions().len())
            .field("selection", &self.selection())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
