use std::sync::Arc;

use quiz_core::model::{AnswerSubmission, Grade, Question, Subject, SubjectId, Topic, UserId};
use quiz_core::{Phase, QuizScope, Step};
use services::{Endpoint, InMemoryQuizBackend, QuizApiError, QuizBackend, QuizItem};

use super::test_harness::{ViewKind, setup_view_harness};
use crate::vm::QuizIntent;

fn catalog() -> InMemoryQuizBackend {
    InMemoryQuizBackend::new()
        .with_users(&["alice", "bob"])
        .with_subjects("alice", vec![Subject::new("math", "Mathematics")])
        .with_topics("alice", "math", vec![Topic::new("add", "Addition")])
        .with_quiz(
            "alice",
            "math",
            "add",
            vec![
                QuizItem::multiple_choice("Pick the vowels", &["A", "B", "C"], &["A", "C"]),
                QuizItem::true_false("1 + 1 = 2", true),
            ],
        )
        .with_random_pool(vec![QuizItem::fill_in("Capital of France?", "Paris")], 3)
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_users() {
    let mut harness = setup_view_harness(ViewKind::Home, Arc::new(catalog()));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(html.contains("Select a user"), "missing placeholder in {html}");
    assert!(html.contains("alice"), "missing alice in {html}");
    assert!(html.contains("bob"), "missing bob in {html}");
    assert!(!html.contains("Failed to fetch"), "unexpected error in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_loads_users_once_after_mount() {
    let backend = catalog();
    let mut harness = setup_view_harness(ViewKind::Home, Arc::new(backend.clone()));
    assert_eq!(backend.calls(Endpoint::Users), 0);

    harness.rebuild();
    harness.drive_async().await;
    assert_eq!(backend.calls(Endpoint::Users), 1);

    harness
        .dispatch(QuizIntent::SelectUser("alice".to_string()))
        .await;
    assert_eq!(backend.calls(Endpoint::Users), 1);
    assert_eq!(harness.flow().phase(), Phase::SelectingSubject);
}

struct DownBackend;

#[async_trait::async_trait]
impl QuizBackend for DownBackend {
    async fn list_users(&self) -> Result<Vec<UserId>, QuizApiError> {
        Err(QuizApiError::Unavailable("down".to_string()))
    }

    async fn list_subjects(&self, _user: &UserId) -> Result<Vec<Subject>, QuizApiError> {
        Err(QuizApiError::Unavailable("down".to_string()))
    }

    async fn list_topics(
        &self,
        _user: &UserId,
        _subject: &SubjectId,
    ) -> Result<Vec<Topic>, QuizApiError> {
        Err(QuizApiError::Unavailable("down".to_string()))
    }

    async fn next_question(&self, _scope: &QuizScope) -> Result<Question, QuizApiError> {
        Err(QuizApiError::Unavailable("down".to_string()))
    }

    async fn random_question(&self) -> Result<Question, QuizApiError> {
        Err(QuizApiError::Unavailable("down".to_string()))
    }

    async fn check_answer(
        &self,
        _scope: Option<&QuizScope>,
        _submission: &AnswerSubmission,
    ) -> Result<Grade, QuizApiError> {
        Err(QuizApiError::Unavailable("down".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_users_error() {
    let mut harness = setup_view_harness(ViewKind::Home, Arc::new(DownBackend));
    harness.rebuild();
    harness.drive_async().await;

    let html = harness.render();
    assert!(
        html.contains("Failed to fetch users. Please try again later."),
        "missing error in {html}"
    );
    assert!(html.contains("Retry"), "missing retry in {html}");
    assert!(!html.contains("Select a user"), "unexpected dropdown in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn subjects_error_leaves_user_dropdown_usable() {
    let backend = catalog();
    backend.fail(Endpoint::Subjects);
    let mut harness = setup_view_harness(ViewKind::Home, Arc::new(backend));
    harness.rebuild();
    harness.drive_async().await;

    harness
        .dispatch(QuizIntent::SelectUser("alice".to_string()))
        .await;

    let html = harness.render();
    assert!(
        html.contains("Failed to fetch subjects. Please try again later."),
        "missing subjects error in {html}"
    );
    assert!(!html.contains("Failed to fetch users"), "users affected in {html}");
    assert!(html.contains("bob"), "user options missing in {html}");
    assert_eq!(harness.flow().phase(), Phase::Error(Step::Subjects));
}

#[tokio::test(flavor = "current_thread")]
async fn guided_quiz_runs_to_completion() {
    let backend = catalog();
    let mut harness = setup_view_harness(ViewKind::Home, Arc::new(backend.clone()));
    harness.rebuild();
    harness.drive_async().await;

    harness
        .dispatch(QuizIntent::SelectUser("alice".to_string()))
        .await;
    harness
        .dispatch(QuizIntent::SelectSubject("math".to_string()))
        .await;
    harness
        .dispatch(QuizIntent::SelectTopic("add".to_string()))
        .await;

    let html = harness.render();
    assert!(html.contains("Pick the vowels"), "missing question in {html}");
    assert!(html.contains("Question 1 of 2"), "missing progress in {html}");

    harness.dispatch(QuizIntent::Submit).await;
    let html = harness.render();
    assert!(
        html.contains("Choose an answer before submitting."),
        "missing notice in {html}"
    );

    harness
        .dispatch(QuizIntent::SelectOption("A".to_string()))
        .await;
    harness
        .dispatch(QuizIntent::SelectOption("C".to_string()))
        .await;
    harness.dispatch(QuizIntent::Submit).await;

    assert_eq!(backend.submissions()[0].answer, "A,C");
    let html = harness.render();
    assert!(html.contains("1 + 1 = 2"), "next question not loaded in {html}");
    assert!(html.contains("Score: 1"), "missing score in {html}");

    harness
        .dispatch(QuizIntent::SelectOption("True".to_string()))
        .await;
    harness.dispatch(QuizIntent::Submit).await;

    let html = harness.render();
    assert!(
        html.contains("Test completed! Final score: 2"),
        "missing completion in {html}"
    );
    assert_eq!(backend.calls(Endpoint::Questions), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_starts_random_quiz() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Arc::new(catalog()));
    harness.rebuild();

    let html = harness.render();
    assert!(html.contains("Start"), "missing start button in {html}");

    harness.dispatch(QuizIntent::StartRandom).await;
    let html = harness.render();
    assert!(html.contains("Capital of France?"), "missing question in {html}");
    assert!(html.contains("Question 1 of 3"), "missing progress in {html}");
}
