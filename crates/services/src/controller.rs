use std::sync::Arc;
use std::time::Duration;

use quiz_core::model::{SubjectId, TopicId, UserId};
use quiz_core::{
    AdvanceTicket, FlowError, Pending, QuizFlow, QuizMode, QuizRequest, QuizResponse, Resolution,
    Step, StepError,
};
use tracing::instrument;

use crate::backend::QuizBackend;
use crate::config::ADVANCE_DELAY;
use crate::error::QuizApiError;

/// Run one flow request against the backend.
///
/// Failures are logged and folded into a step-scoped `StepError`; nothing is
/// retried.
pub async fn execute(
    backend: &dyn QuizBackend,
    request: &QuizRequest,
) -> Result<QuizResponse, StepError> {
    let step = request.step();
    let result = match request {
        QuizRequest::Users => backend.list_users().await.map(QuizResponse::Users),
        QuizRequest::Subjects { user } => {
            backend.list_subjects(user).await.map(QuizResponse::Subjects)
        }
        QuizRequest::Topics { user, subject } => backend
            .list_topics(user, subject)
            .await
            .map(QuizResponse::Topics),
        QuizRequest::Question { scope } => backend
            .next_question(scope)
            .await
            .map(QuizResponse::Question),
        QuizRequest::RandomQuestion => backend.random_question().await.map(QuizResponse::Question),
        QuizRequest::Grade { scope, submission } => backend
            .check_answer(scope.as_ref(), submission)
            .await
            .map(QuizResponse::Grade),
    };
    result.map_err(|err| step_error(step, &err))
}

fn step_error(step: Step, err: &QuizApiError) -> StepError {
    tracing::warn!(?step, error = %err, "quiz backend request failed");
    StepError::new(step, err.to_string())
}

/// Mutable access to a [`QuizFlow`] that is never held across an await.
pub trait FlowHandle {
    fn update<R>(&mut self, f: impl FnOnce(&mut QuizFlow) -> R) -> R;
}

impl FlowHandle for QuizFlow {
    fn update<R>(&mut self, f: impl FnOnce(&mut QuizFlow) -> R) -> R {
        f(self)
    }
}

/// Execute `pending` and apply its result to the flow.
pub async fn run_step<H: FlowHandle>(
    backend: &dyn QuizBackend,
    flow: &mut H,
    pending: Pending,
) -> Resolution {
    let result = execute(backend, &pending.request).await;
    let (resolution, score) =
        flow.update(|flow| (flow.resolve(pending.ticket, result), flow.score()));
    match resolution {
        Resolution::Stale => {
            tracing::debug!(step = ?pending.ticket.step(), "dropping stale response");
        }
        Resolution::Completed => tracing::info!(score, "test completed"),
        _ => {}
    }
    resolution
}

/// Wait `delay`, then load the next question.
///
/// Returns `None` if the ticket went stale while waiting.
pub async fn advance_step<H: FlowHandle>(
    backend: &dyn QuizBackend,
    flow: &mut H,
    delay: Duration,
    ticket: AdvanceTicket,
) -> Option<Resolution> {
    tokio::time::sleep(delay).await;
    let Some(pending) = flow.update(|flow| flow.advance(ticket)) else {
        tracing::debug!("advance ticket is stale, skipping next question");
        return None;
    };
    Some(run_step(backend, flow, pending).await)
}

/// Run `pending`, then keep loading questions after each graded answer.
///
/// Stops at the first resolution that is not `Advance`. An outdated advance
/// ticket ends the loop with `Resolution::Stale`.
pub async fn drive<H: FlowHandle>(
    backend: &dyn QuizBackend,
    flow: &mut H,
    delay: Duration,
    pending: Pending,
) -> Resolution {
    let mut resolution = run_step(backend, flow, pending).await;
    while let Resolution::Advance(ticket) = resolution {
        resolution = match advance_step(backend, flow, delay, ticket).await {
            Some(next) => next,
            None => return Resolution::Stale,
        };
    }
    resolution
}

/// Drives a [`QuizFlow`] against a [`QuizBackend`].
///
/// Each selection triggers the dependent fetch right away; grading is
/// followed by a fixed delay before the next question is loaded.
pub struct QuizFlowController {
    backend: Arc<dyn QuizBackend>,
    flow: QuizFlow,
    advance_delay: Duration,
}

impl QuizFlowController {
    #[must_use]
    pub fn new(backend: Arc<dyn QuizBackend>, mode: QuizMode) -> Self {
        Self {
            backend,
            flow: QuizFlow::new(mode),
            advance_delay: ADVANCE_DELAY,
        }
    }

    #[must_use]
    pub fn guided(backend: Arc<dyn QuizBackend>) -> Self {
        Self::new(backend, QuizMode::Guided)
    }

    #[must_use]
    pub fn random(backend: Arc<dyn QuizBackend>) -> Self {
        Self::new(backend, QuizMode::Random)
    }

    #[must_use]
    pub fn with_advance_delay(mut self, delay: Duration) -> Self {
        self.advance_delay = delay;
        self
    }

    #[must_use]
    pub fn flow(&self) -> &QuizFlow {
        &self.flow
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    pub async fn load_users(&mut self) -> Resolution {
        let pending = self.flow.load_users();
        self.run(pending).await
    }

    /// Select a user and load their subjects.
    ///
    /// Returns `None` when the user was already selected.
    #[instrument(skip(self))]
    pub async fn select_user(&mut self, user: UserId) -> Option<Resolution> {
        let pending = self.flow.select_user(user)?;
        Some(self.run(pending).await)
    }

    /// Select a subject and load its topics.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoUser` when no user is selected.
    #[instrument(skip(self))]
    pub async fn select_subject(
        &mut self,
        subject: SubjectId,
    ) -> Result<Option<Resolution>, FlowError> {
        let Some(pending) = self.flow.select_subject(subject)? else {
            return Ok(None);
        };
        Ok(Some(self.run(pending).await))
    }

    /// Select a topic and load its first question.
    ///
    /// # Errors
    ///
    /// Returns a `FlowError` when upstream selections are missing.
    #[instrument(skip(self))]
    pub async fn select_topic(&mut self, topic: TopicId) -> Result<Option<Resolution>, FlowError> {
        let Some(pending) = self.flow.select_topic(topic)? else {
            return Ok(None);
        };
        Ok(Some(self.run(pending).await))
    }

    /// # Errors
    ///
    /// Returns a `FlowError` when the scope is incomplete or the test ended.
    pub async fn load_question(&mut self) -> Result<Resolution, FlowError> {
        let pending = self.flow.load_question()?;
        Ok(self.run(pending).await)
    }

    /// # Errors
    ///
    /// Returns `FlowError::Completed` after the test ended.
    pub async fn load_random_question(&mut self) -> Result<Resolution, FlowError> {
        let pending = self.flow.load_random_question()?;
        Ok(self.run(pending).await)
    }

    /// # Errors
    ///
    /// See [`QuizFlow::select_option`].
    pub fn select_option(&mut self, option: &str) -> Result<(), FlowError> {
        self.flow.select_option(option)
    }

    /// # Errors
    ///
    /// See [`QuizFlow::set_text`].
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), FlowError> {
        self.flow.set_text(text)
    }

    /// Send the current answer for grading.
    ///
    /// The returned resolution is `Advance` when another question follows
    /// and `Completed` when the backend ended the test.
    ///
    /// # Errors
    ///
    /// Returns a `FlowError` when there is nothing submittable.
    pub async fn submit_answer(&mut self) -> Result<Resolution, FlowError> {
        let pending = self.flow.submit_answer()?;
        Ok(self.run(pending).await)
    }

    /// Wait out the post-grading delay, then load the next question.
    ///
    /// Returns `None` if the ticket went stale while waiting.
    pub async fn advance_after_delay(&mut self, ticket: AdvanceTicket) -> Option<Resolution> {
        advance_step(
            self.backend.as_ref(),
            &mut self.flow,
            self.advance_delay,
            ticket,
        )
        .await
    }

    /// Submit, then either stop on completion or load the next question
    /// after the delay.
    ///
    /// # Errors
    ///
    /// Returns a `FlowError` when there is nothing submittable.
    pub async fn submit_and_continue(&mut self) -> Result<Resolution, FlowError> {
        match self.submit_answer().await? {
            Resolution::Advance(ticket) => Ok(self
                .advance_after_delay(ticket)
                .await
                .unwrap_or(Resolution::Stale)),
            other => Ok(other),
        }
    }

    /// Re-run the request of a failed step.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NothingToRetry` when the step has not failed.
    pub async fn retry(&mut self, step: Step) -> Result<Resolution, FlowError> {
        let pending = self.flow.retry(step)?;
        Ok(self.run(pending).await)
    }

    async fn run(&mut self, pending: Pending) -> Resolution {
        run_step(self.backend.as_ref(), &mut self.flow, pending).await
    }
}
