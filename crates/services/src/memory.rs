use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use rand::Rng;

use quiz_core::QuizScope;
use quiz_core::model::{
    AnswerStatus, AnswerSubmission, Grade, Question, QuestionKind, Subject, SubjectId, TestStatus,
    Topic, TopicId, UserId,
};

use crate::backend::QuizBackend;
use crate::error::QuizApiError;

/// Backend endpoints, used to inject failures and count calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Users,
    Subjects,
    Topics,
    Questions,
    RandomQuestion,
    CheckAnswer,
}

/// A question together with its expected answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizItem {
    pub text: String,
    pub options: Vec<String>,
    pub kind: QuestionKind,
    pub answer: String,
}

impl QuizItem {
    #[must_use]
    pub fn multiple_choice(text: &str, options: &[&str], correct: &[&str]) -> Self {
        Self {
            text: text.to_string(),
            options: options.iter().map(|value| (*value).to_string()).collect(),
            kind: QuestionKind::MultipleChoice,
            answer: correct.join(","),
        }
    }

    #[must_use]
    pub fn fill_in(text: &str, answer: &str) -> Self {
        Self {
            text: text.to_string(),
            options: Vec::new(),
            kind: QuestionKind::FillInTheBlank,
            answer: answer.to_string(),
        }
    }

    #[must_use]
    pub fn true_false(text: &str, answer: bool) -> Self {
        Self {
            text: text.to_string(),
            options: vec!["True".to_string(), "False".to_string()],
            kind: QuestionKind::TrueOrFalse,
            answer: if answer { "True" } else { "False" }.to_string(),
        }
    }

    fn to_question(&self, index: usize, total: usize) -> Question {
        Question {
            text: self.text.clone(),
            options: self.options.clone(),
            kind: self.kind,
            status: TestStatus::InProgress,
            index: u32::try_from(index + 1).unwrap_or(u32::MAX),
            total: u32::try_from(total).unwrap_or(u32::MAX),
        }
    }

    fn accepts(&self, answer: &str) -> bool {
        match self.kind {
            QuestionKind::MultipleChoice => {
                let expected: HashSet<&str> = self.answer.split(',').collect();
                let given: HashSet<&str> = answer.split(',').collect();
                expected == given
            }
            QuestionKind::FillInTheBlank => self.answer.trim().eq_ignore_ascii_case(answer.trim()),
            QuestionKind::TrueOrFalse => self.answer == answer,
        }
    }
}

type ScopeKey = (UserId, SubjectId, TopicId);

#[derive(Default)]
struct Test {
    answered: usize,
    score: u32,
}

#[derive(Default)]
struct MemoryState {
    users: Vec<UserId>,
    subjects: HashMap<UserId, Vec<Subject>>,
    topics: HashMap<(UserId, SubjectId), Vec<Topic>>,
    quizzes: HashMap<ScopeKey, Vec<QuizItem>>,
    tests: HashMap<ScopeKey, Test>,
    random_pool: Vec<QuizItem>,
    random_rounds: usize,
    random_test: Test,
    random_current: Option<usize>,
    failing: HashSet<Endpoint>,
    calls: HashMap<Endpoint, usize>,
    submissions: Vec<AnswerSubmission>,
}

/// Scripted in-memory backend for tests and offline demos.
#[derive(Clone, Default)]
pub struct InMemoryQuizBackend {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryQuizBackend {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Small catalog used by the offline mode of the app.
    #[must_use]
    pub fn demo() -> Self {
        let backend = Self::new()
            .with_users(&["alice", "bob"])
            .with_subjects("alice", vec![Subject::new("math", "Mathematics")])
            .with_subjects("bob", vec![Subject::new("geo", "Geography")])
            .with_topics(
                "alice",
                "math",
                vec![Topic::new("add", "Addition"), Topic::new("frac", "Fractions")],
            )
            .with_topics("bob", "geo", vec![Topic::new("capitals", "Capitals")])
            .with_quiz(
                "alice",
                "math",
                "add",
                vec![
                    QuizItem::multiple_choice(
                        "Which sums equal 4?",
                        &["2+2", "3+1", "3+2"],
                        &["2+2", "3+1"],
                    ),
                    QuizItem::fill_in("7 + 5 = ?", "12"),
                    QuizItem::true_false("0 + 0 = 1", false),
                ],
            )
            .with_quiz(
                "alice",
                "math",
                "frac",
                vec![QuizItem::fill_in("1/2 + 1/4 = ?", "3/4")],
            )
            .with_quiz(
                "bob",
                "geo",
                "capitals",
                vec![
                    QuizItem::fill_in("Capital of France?", "Paris"),
                    QuizItem::true_false("Canberra is the capital of Australia", true),
                ],
            );
        backend.with_random_pool(
            vec![
                QuizItem::true_false("The Pacific is the largest ocean", true),
                QuizItem::fill_in("Chemical symbol for gold?", "Au"),
                QuizItem::multiple_choice("Pick the primes", &["2", "4", "5", "9"], &["2", "5"]),
            ],
            5,
        )
    }

    #[must_use]
    pub fn with_users(self, users: &[&str]) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.users = users.iter().map(|user| UserId::new(*user)).collect();
        }
        self
    }

    #[must_use]
    pub fn with_subjects(self, user: &str, subjects: Vec<Subject>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.subjects.insert(UserId::new(user), subjects);
        }
        self
    }

    #[must_use]
    pub fn with_topics(self, user: &str, subject: &str, topics: Vec<Topic>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state
                .topics
                .insert((UserId::new(user), SubjectId::new(subject)), topics);
        }
        self
    }

    #[must_use]
    pub fn with_quiz(self, user: &str, subject: &str, topic: &str, items: Vec<QuizItem>) -> Self {
        if let Ok(mut state) = self.state.lock() {
            let key = (UserId::new(user), SubjectId::new(subject), TopicId::new(topic));
            state.tests.remove(&key);
            state.quizzes.insert(key, items);
        }
        self
    }

    /// Random questions are drawn from `items`; the test completes after
    /// `rounds` graded answers.
    #[must_use]
    pub fn with_random_pool(self, items: Vec<QuizItem>, rounds: usize) -> Self {
        if let Ok(mut state) = self.state.lock() {
            state.random_pool = items;
            state.random_rounds = rounds;
            state.random_test = Test::default();
            state.random_current = None;
        }
        self
    }

    /// Make every call to `endpoint` fail until [`Self::restore`] is called.
    pub fn fail(&self, endpoint: Endpoint) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.insert(endpoint);
        }
    }

    pub fn restore(&self, endpoint: Endpoint) {
        if let Ok(mut state) = self.state.lock() {
            state.failing.remove(&endpoint);
        }
    }

    #[must_use]
    pub fn calls(&self, endpoint: Endpoint) -> usize {
        self.state
            .lock()
            .map(|state| state.calls.get(&endpoint).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    #[must_use]
    pub fn submissions(&self) -> Vec<AnswerSubmission> {
        self.state
            .lock()
            .map(|state| state.submissions.clone())
            .unwrap_or_default()
    }

    fn enter(&self, endpoint: Endpoint) -> Result<MutexGuard<'_, MemoryState>, QuizApiError> {
        let mut state = self
            .state
            .lock()
            .map_err(|e| QuizApiError::Unavailable(e.to_string()))?;
        *state.calls.entry(endpoint).or_insert(0) += 1;
        if state.failing.contains(&endpoint) {
            return Err(QuizApiError::Unavailable(format!("{endpoint:?} is down")));
        }
        Ok(state)
    }
}

fn scope_key(scope: &QuizScope) -> ScopeKey {
    (scope.user.clone(), scope.subject.clone(), scope.topic.clone())
}

fn grade(test: &mut Test, item: &QuizItem, answer: &str, total: usize) -> Grade {
    let correct = item.accepts(answer);
    if correct {
        test.score += 1;
    }
    test.answered += 1;
    Grade {
        answer_status: if correct {
            AnswerStatus::Correct
        } else {
            AnswerStatus::Incorrect
        },
        score: test.score,
        test_status: if test.answered >= total {
            TestStatus::Completed
        } else {
            TestStatus::InProgress
        },
    }
}

#[async_trait]
impl QuizBackend for InMemoryQuizBackend {
    async fn list_users(&self) -> Result<Vec<UserId>, QuizApiError> {
        let state = self.enter(Endpoint::Users)?;
        Ok(state.users.clone())
    }

    async fn list_subjects(&self, user: &UserId) -> Result<Vec<Subject>, QuizApiError> {
        let state = self.enter(Endpoint::Subjects)?;
        Ok(state.subjects.get(user).cloned().unwrap_or_default())
    }

    async fn list_topics(
        &self,
        user: &UserId,
        subject: &SubjectId,
    ) -> Result<Vec<Topic>, QuizApiError> {
        let state = self.enter(Endpoint::Topics)?;
        Ok(state
            .topics
            .get(&(user.clone(), subject.clone()))
            .cloned()
            .unwrap_or_default())
    }

    async fn next_question(&self, scope: &QuizScope) -> Result<Question, QuizApiError> {
        let mut state = self.enter(Endpoint::Questions)?;
        let key = scope_key(scope);
        let answered = state.tests.entry(key.clone()).or_default().answered;
        let items = state
            .quizzes
            .get(&key)
            .ok_or_else(|| QuizApiError::Unavailable("no questions for topic".to_string()))?;
        let item = items
            .get(answered)
            .ok_or_else(|| QuizApiError::Unavailable("test already completed".to_string()))?;
        Ok(item.to_question(answered, items.len()))
    }

    async fn random_question(&self) -> Result<Question, QuizApiError> {
        let mut state = self.enter(Endpoint::RandomQuestion)?;
        if state.random_pool.is_empty() {
            return Err(QuizApiError::Unavailable("random pool is empty".to_string()));
        }
        let pick = rand::rng().random_range(0..state.random_pool.len());
        state.random_current = Some(pick);
        let answered = state.random_test.answered;
        let total = state.random_rounds.max(1);
        Ok(state.random_pool[pick].to_question(answered, total))
    }

    async fn check_answer(
        &self,
        scope: Option<&QuizScope>,
        submission: &AnswerSubmission,
    ) -> Result<Grade, QuizApiError> {
        let mut state = self.enter(Endpoint::CheckAnswer)?;
        state.submissions.push(submission.clone());
        let state = &mut *state;

        match scope {
            Some(scope) => {
                let key = scope_key(scope);
                let items = state
                    .quizzes
                    .get(&key)
                    .ok_or_else(|| QuizApiError::Unavailable("no questions for topic".into()))?;
                let test = state.tests.entry(key).or_default();
                let item = items
                    .get(test.answered)
                    .filter(|item| item.text == submission.question)
                    .ok_or_else(|| QuizApiError::Unavailable("unknown question".into()))?;
                Ok(grade(test, item, &submission.answer, items.len()))
            }
            None => {
                let item = state
                    .random_current
                    .take()
                    .and_then(|pick| state.random_pool.get(pick))
                    .filter(|item| item.text == submission.question)
                    .ok_or_else(|| QuizApiError::Unavailable("unknown question".into()))?;
                let total = state.random_rounds.max(1);
                Ok(grade(&mut state.random_test, item, &submission.answer, total))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scope() -> QuizScope {
        QuizScope {
            user: UserId::new("alice"),
            subject: SubjectId::new("math"),
            topic: TopicId::new("add"),
        }
    }

    #[tokio::test]
    async fn demo_catalog_cascades() {
        let backend = InMemoryQuizBackend::demo();
        let users = backend.list_users().await.unwrap();
        assert_eq!(users, vec![UserId::new("alice"), UserId::new("bob")]);

        let subjects = backend.list_subjects(&UserId::new("alice")).await.unwrap();
        assert_eq!(subjects[0].name, "Mathematics");

        let topics = backend
            .list_topics(&UserId::new("alice"), &SubjectId::new("math"))
            .await
            .unwrap();
        assert_eq!(topics.len(), 2);
    }

    #[tokio::test]
    async fn grading_walks_through_quiz_and_completes() {
        let backend = InMemoryQuizBackend::new().with_quiz(
            "alice",
            "math",
            "add",
            vec![
                QuizItem::multiple_choice("Pick", &["A", "B", "C"], &["A", "C"]),
                QuizItem::true_false("Yes?", true),
            ],
        );

        let first = backend.next_question(&scope()).await.unwrap();
        assert_eq!(first.index, 1);
        assert_eq!(first.total, 2);
        let grade = backend
            .check_answer(
                Some(&scope()),
                &AnswerSubmission {
                    question: first.text,
                    answer: "C,A".into(),
                },
            )
            .await
            .unwrap();
        assert!(grade.answer_status.is_correct());
        assert_eq!(grade.test_status, TestStatus::InProgress);

        let second = backend.next_question(&scope()).await.unwrap();
        let grade = backend
            .check_answer(
                Some(&scope()),
                &AnswerSubmission {
                    question: second.text,
                    answer: "False".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(grade.answer_status, AnswerStatus::Incorrect);
        assert_eq!(grade.score, 1);
        assert!(grade.test_status.is_completed());
    }

    #[tokio::test]
    async fn failing_endpoint_errors_and_counts() {
        let backend = InMemoryQuizBackend::new().with_users(&["alice"]);
        backend.fail(Endpoint::Users);
        assert!(matches!(
            backend.list_users().await,
            Err(QuizApiError::Unavailable(_))
        ));

        backend.restore(Endpoint::Users);
        assert_eq!(backend.list_users().await.unwrap().len(), 1);
        assert_eq!(backend.calls(Endpoint::Users), 2);
    }

    #[tokio::test]
    async fn random_questions_come_from_pool() {
        let backend = InMemoryQuizBackend::new()
            .with_random_pool(vec![QuizItem::fill_in("Symbol for gold?", "Au")], 1);
        let question = backend.random_question().await.unwrap();
        assert_eq!(question.text, "Symbol for gold?");

        let grade = backend
            .check_answer(
                None,
                &AnswerSubmission {
                    question: question.text,
                    answer: " au ".into(),
                },
            )
            .await
            .unwrap();
        assert!(grade.answer_status.is_correct());
        assert!(grade.test_status.is_completed());
    }
}
