use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use dioxus::prelude::*;

use quiz_core::QuestionBank;
use quiz_core::model::{Attempt, RawQuestion, Topic, TopicId};
use quiz_core::time::fixed_now;
use services::{QuizIntent, QuizPhase};
use storage::{AttemptRepository, InMemoryRepository, KeyValueRepository, Storage, StorageError};

use super::test_harness::{ViewHarness, ViewKind, setup_view_harness, setup_view_harness_with};

fn two_topic_bank() -> QuestionBank {
    let topic = |id: &str, title: &str| {
        let question =
            RawQuestion::new("Q", "right", vec!["wrong".to_owned()], "why").expect("question");
        Topic::new(
            TopicId::new(id),
            title,
            "https://example.com/",
            format!("/pdfs/{id}.pdf"),
            vec![question],
        )
        .expect("topic")
    };
    QuestionBank::new(vec![topic("a", "Alpha Basics"), topic("b", "Beta Advanced")])
        .expect("bank")
}

fn answer_until_done(harness: &mut ViewHarness) {
    let handles = harness.quiz_handles.clone();
    loop {
        let (phase, answer) = harness.dom.in_runtime(|| {
            let session = handles.session();
            let session = session.read();
            (
                session.phase(),
                session.current_question().map(|question| question.answer_index()),
            )
        });
        if phase != QuizPhase::InProgress {
            break;
        }
        let answer = answer.expect("question on screen");
        harness.dom.in_runtime(|| {
            handles.dispatch().call(QuizIntent::SelectOption(answer));
            handles.dispatch().call(QuizIntent::Next);
        });
        harness.drive();
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_single_topic_is_ready() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("PM Quiz Studio"), "missing hero in {html}");
    assert!(html.contains("Topic selected"), "missing placeholder in {html}");
    assert!(html.contains("15 questions"), "missing count tag in {html}");
    assert!(!html.contains("Search topics"), "unexpected search in {html}");
    assert!(!html.contains("Select a topic to unlock"), "topic not preselected in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_several_topics_start_idle() {
    let mut harness = setup_view_harness_with(ViewKind::Quiz, Storage::in_memory(), two_topic_bank());
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Search topics"), "missing search in {html}");
    assert!(html.contains("Choose a topic"), "missing placeholder in {html}");
    assert!(html.contains("Alpha Basics") && html.contains("Beta Advanced"), "missing topics in {html}");
    assert!(html.contains("Select a topic to unlock the quiz."), "missing hint in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_plays_through_and_saves() {
    let mut harness = setup_view_harness(ViewKind::Quiz);
    harness.rebuild();
    let handles = harness.quiz_handles.clone();

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(QuizIntent::Start));
    harness.drive();
    let html = harness.render();
    assert!(html.contains("Question 1/15"), "missing counter in {html}");
    assert!(html.contains("Next →"), "missing next label in {html}");

    answer_until_done(&mut harness);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Score: 15/15"), "missing score in {html}");
    assert!(html.contains("PM Ace"), "missing badge in {html}");
    assert!(html.contains("Back to start"), "missing action in {html}");

    let stored = harness.storage.attempts.load_attempts().await.expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].percent(), 100);
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_lists_attempts() {
    let storage = Storage::in_memory();
    let attempt =
        Attempt::new(TopicId::new("ai-101"), "AI Foundations", 9, 15, fixed_now()).expect("attempt");
    storage.attempts.save_attempt(&attempt).await.expect("save");

    let bank = QuestionBank::builtin().expect("bank");
    let mut harness = setup_view_harness_with(ViewKind::History, storage, bank);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("AI Foundations"), "missing topic in {html}");
    assert!(html.contains("9/15"), "missing score in {html}");
    assert!(html.contains("(60%)"), "missing percent in {html}");
    assert!(html.contains("Solid Start"), "missing badge in {html}");
}

struct BrokenValues;

#[async_trait::async_trait]
impl KeyValueRepository for BrokenValues {
    async fn get_value(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn put_value(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_degrades_to_empty() {
    let storage = Storage::from_values(Arc::new(BrokenValues));
    let bank = QuestionBank::builtin().expect("bank");
    let mut harness = setup_view_harness_with(ViewKind::History, storage, bank);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("No attempts yet"), "missing empty state in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn history_view_smoke_ignores_corrupt_blob() {
    let values = Arc::new(InMemoryRepository::new());
    values
        .put_value(storage::ATTEMPTS_KEY, "{not json")
        .await
        .expect("put");
    let storage = Storage::from_values(values);
    let bank = QuestionBank::builtin().expect("bank");
    let mut harness = setup_view_harness_with(ViewKind::History, storage, bank);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("No attempts yet"), "missing empty state in {html}");
}

struct FlakyValues {
    online: AtomicBool,
    inner: InMemoryRepository,
}

#[async_trait::async_trait]
impl KeyValueRepository for FlakyValues {
    async fn get_value(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.inner.get_value(key).await
    }

    async fn put_value(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if !self.online.load(Ordering::SeqCst) {
            return Err(StorageError::Connection("offline".to_string()));
        }
        self.inner.put_value(key, value).await
    }
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_retry_save_after_failure() {
    let values = Arc::new(FlakyValues {
        online: AtomicBool::new(false),
        inner: InMemoryRepository::new(),
    });
    let storage = Storage::from_values(values.clone());
    let bank = QuestionBank::builtin().expect("bank");
    let mut harness = setup_view_harness_with(ViewKind::Quiz, storage, bank);
    harness.rebuild();
    let handles = harness.quiz_handles.clone();

    harness
        .dom
        .in_runtime(|| handles.dispatch().call(QuizIntent::Start));
    harness.drive();
    answer_until_done(&mut harness);
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Score: 15/15"), "missing score in {html}");
    assert!(html.contains("Retry save"), "missing retry in {html}");
    assert!(harness.storage.attempts.load_attempts().await.expect("load").is_empty());

    values.online.store(true, Ordering::SeqCst);
    harness.dom.in_runtime(|| handles.retry_save().call(()));
    harness.drive_async().await;
    harness.drive_async().await;

    let html = harness.render();
    assert!(!html.contains("Retry save"), "retry still shown in {html}");
    assert!(html.contains("Score: 15/15"), "result lost in {html}");
    let stored = harness.storage.attempts.load_attempts().await.expect("load");
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].score(), 15);
}
