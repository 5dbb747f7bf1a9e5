use thiserror::Error;

use crate::flow::request::{
    AdvanceTicket, Pending, QuizRequest, QuizResponse, QuizScope, RequestTicket, Resolution,
};
use crate::flow::step::{Phase, Step, StepError, StepState};
use crate::model::{
    AnswerDraft, AnswerError, AnswerSubmission, Grade, Question, Subject, SubjectId, Topic,
    TopicId, UserId,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Transitions rejected by the current flow state.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlowError {
    #[error("select a user first")]
    NoUser,

    #[error("select a subject first")]
    NoSubject,

    #[error("select a topic first")]
    NoTopic,

    #[error("no question is loaded")]
    NoQuestion,

    #[error("the answer has already been submitted")]
    AnswerLocked,

    #[error("the test is completed")]
    Completed,

    #[error("step {0:?} has nothing to retry")]
    NothingToRetry(Step),

    #[error(transparent)]
    Answer(#[from] AnswerError),
}

//
// ─── MODE ──────────────────────────────────────────────────────────────────────
//

/// Where questions come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizMode {
    /// Questions for the selected user/subject/topic.
    Guided,
    /// Standalone quiz of random questions.
    Random,
}

//
// ─── FLOW STATE ────────────────────────────────────────────────────────────────
//

/// Explicit quiz session state with pure transitions.
///
/// Transitions that need backend data return a [`Pending`] request. The
/// caller executes it and hands the result back through [`QuizFlow::resolve`].
/// Every request carries a ticket; responses whose ticket was superseded by a
/// later selection are dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizFlow {
    mode: QuizMode,
    phase: Phase,

    users: StepState<Vec<UserId>>,
    subjects: StepState<Vec<Subject>>,
    topics: StepState<Vec<Topic>>,
    question: StepState<Question>,
    grading: StepState<Grade>,

    selected_user: Option<UserId>,
    selected_subject: Option<SubjectId>,
    selected_topic: Option<TopicId>,

    draft: Option<AnswerDraft>,
    score: u32,
    completed: bool,

    next_request: u64,
    latest: [u64; 5],
    session: u64,
}

impl QuizFlow {
    #[must_use]
    pub fn new(mode: QuizMode) -> Self {
        Self {
            mode,
            phase: Phase::Idle,
            users: StepState::Idle,
            subjects: StepState::Idle,
            topics: StepState::Idle,
            question: StepState::Idle,
            grading: StepState::Idle,
            selected_user: None,
            selected_subject: None,
            selected_topic: None,
            draft: None,
            score: 0,
            completed: false,
            next_request: 0,
            latest: [0; 5],
            session: 0,
        }
    }

    #[must_use]
    pub fn guided() -> Self {
        Self::new(QuizMode::Guided)
    }

    #[must_use]
    pub fn random() -> Self {
        Self::new(QuizMode::Random)
    }

    // ─── Accessors ─────────────────────────────────────────────────────────────

    #[must_use]
    pub fn mode(&self) -> QuizMode {
        self.mode
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn users(&self) -> &StepState<Vec<UserId>> {
        &self.users
    }

    #[must_use]
    pub fn subjects(&self) -> &StepState<Vec<Subject>> {
        &self.subjects
    }

    #[must_use]
    pub fn topics(&self) -> &StepState<Vec<Topic>> {
        &self.topics
    }

    #[must_use]
    pub fn question(&self) -> &StepState<Question> {
        &self.question
    }

    #[must_use]
    pub fn grading(&self) -> &StepState<Grade> {
        &self.grading
    }

    #[must_use]
    pub fn selected_user(&self) -> Option<&UserId> {
        self.selected_user.as_ref()
    }

    #[must_use]
    pub fn selected_subject(&self) -> Option<&SubjectId> {
        self.selected_subject.as_ref()
    }

    #[must_use]
    pub fn selected_topic(&self) -> Option<&TopicId> {
        self.selected_topic.as_ref()
    }

    #[must_use]
    pub fn draft(&self) -> Option<&AnswerDraft> {
        self.draft.as_ref()
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    #[must_use]
    pub fn scope(&self) -> Option<QuizScope> {
        Some(QuizScope {
            user: self.selected_user.clone()?,
            subject: self.selected_subject.clone()?,
            topic: self.selected_topic.clone()?,
        })
    }

    /// Whether the current answer can no longer be edited or submitted.
    #[must_use]
    pub fn answer_locked(&self) -> bool {
        self.completed || matches!(self.grading, StepState::Loading | StepState::Ready(_))
    }

    // ─── Selection ─────────────────────────────────────────────────────────────

    pub fn load_users(&mut self) -> Pending {
        self.users = StepState::Loading;
        self.phase = Phase::SelectingUser;
        Pending {
            ticket: self.issue(Step::Users),
            request: QuizRequest::Users,
        }
    }

    /// Select a user, invalidating every downstream selection.
    ///
    /// Returns `None` when `user` is already selected.
    pub fn select_user(&mut self, user: UserId) -> Option<Pending> {
        if self.selected_user.as_ref() == Some(&user) {
            return None;
        }
        self.selected_user = Some(user.clone());
        self.selected_subject = None;
        self.topics = StepState::Idle;
        self.reset_topic();
        Some(self.begin_subjects(user))
    }

    /// Select a subject for the current user, invalidating the topic.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoUser` when no user is selected.
    pub fn select_subject(&mut self, subject: SubjectId) -> Result<Option<Pending>, FlowError> {
        let user = self.selected_user.clone().ok_or(FlowError::NoUser)?;
        if self.selected_subject.as_ref() == Some(&subject) {
            return Ok(None);
        }
        self.selected_subject = Some(subject.clone());
        self.reset_topic();
        Ok(Some(self.begin_topics(user, subject)))
    }

    /// Select a topic and request its first question.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoUser`/`FlowError::NoSubject` when upstream
    /// selections are missing.
    pub fn select_topic(&mut self, topic: TopicId) -> Result<Option<Pending>, FlowError> {
        if self.selected_user.is_none() {
            return Err(FlowError::NoUser);
        }
        if self.selected_subject.is_none() {
            return Err(FlowError::NoSubject);
        }
        if self.selected_topic.as_ref() == Some(&topic) {
            return Ok(None);
        }
        self.reset_topic();
        self.selected_topic = Some(topic);
        self.phase = Phase::SelectingTopic;
        self.load_question().map(Some)
    }

    // ─── Questions ─────────────────────────────────────────────────────────────

    /// Request the next question for the selected scope.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Completed` after the test ended, or a selection
    /// error when the scope is incomplete.
    pub fn load_question(&mut self) -> Result<Pending, FlowError> {
        if self.completed {
            return Err(FlowError::Completed);
        }
        let scope = self.require_scope()?;
        Ok(self.begin_question(QuizRequest::Question { scope }))
    }

    /// Request a random question regardless of the current selections.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::Completed` after the test ended.
    pub fn load_random_question(&mut self) -> Result<Pending, FlowError> {
        if self.completed {
            return Err(FlowError::Completed);
        }
        Ok(self.begin_question(QuizRequest::RandomQuestion))
    }

    /// Load the next question once the post-grading delay has elapsed.
    ///
    /// Returns `None` when the ticket is stale: the session was reset, the
    /// test completed, or another question was loaded in the meantime.
    pub fn advance(&mut self, ticket: AdvanceTicket) -> Option<Pending> {
        if ticket.session != self.session
            || self.completed
            || !matches!(self.grading, StepState::Ready(_))
        {
            return None;
        }
        match self.mode {
            QuizMode::Guided => self.load_question().ok(),
            QuizMode::Random => self.load_random_question().ok(),
        }
    }

    // ─── Answering ─────────────────────────────────────────────────────────────

    /// Toggle (multiple-choice) or overwrite (other kinds) the draft answer.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoQuestion`, `FlowError::AnswerLocked` or the
    /// draft's `AnswerError`.
    pub fn select_option(&mut self, option: &str) -> Result<(), FlowError> {
        self.editable_draft()?.select_option(option)?;
        Ok(())
    }

    /// Overwrite the free-text answer.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoQuestion`, `FlowError::AnswerLocked` or
    /// `AnswerError::TextNotAccepted` for non fill-in questions.
    pub fn set_text(&mut self, text: impl Into<String>) -> Result<(), FlowError> {
        self.editable_draft()?.set_text(text)?;
        Ok(())
    }

    /// Build the submission for the current question and request grading.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NoQuestion`, `FlowError::AnswerLocked`,
    /// `FlowError::Completed` or `AnswerError::NoAnswer`.
    pub fn submit_answer(&mut self) -> Result<Pending, FlowError> {
        if self.completed {
            return Err(FlowError::Completed);
        }
        let question = self.question.ready().ok_or(FlowError::NoQuestion)?;
        if self.answer_locked() {
            return Err(FlowError::AnswerLocked);
        }
        let draft = self.draft.as_ref().ok_or(FlowError::NoQuestion)?;
        let submission = AnswerSubmission::from_draft(&question.text, draft)?;
        let scope = match self.mode {
            QuizMode::Guided => self.scope(),
            QuizMode::Random => None,
        };

        self.grading = StepState::Loading;
        self.phase = Phase::Grading;
        Ok(Pending {
            ticket: self.issue(Step::Grading),
            request: QuizRequest::Grade { scope, submission },
        })
    }

    // ─── Retry ─────────────────────────────────────────────────────────────────

    /// Re-issue the request of a failed step with the current selections.
    ///
    /// # Errors
    ///
    /// Returns `FlowError::NothingToRetry` when the step has not failed.
    pub fn retry(&mut self, step: Step) -> Result<Pending, FlowError> {
        let failed = match step {
            Step::Users => self.users.error().is_some(),
            Step::Subjects => self.subjects.error().is_some(),
            Step::Topics => self.topics.error().is_some(),
            Step::Question => self.question.error().is_some(),
            Step::Grading => self.grading.error().is_some(),
        };
        if !failed {
            return Err(FlowError::NothingToRetry(step));
        }

        match step {
            Step::Users => Ok(self.load_users()),
            Step::Subjects => {
                let user = self.selected_user.clone().ok_or(FlowError::NoUser)?;
                Ok(self.begin_subjects(user))
            }
            Step::Topics => {
                let user = self.selected_user.clone().ok_or(FlowError::NoUser)?;
                let subject = self.selected_subject.clone().ok_or(FlowError::NoSubject)?;
                Ok(self.begin_topics(user, subject))
            }
            Step::Question => match self.mode {
                QuizMode::Guided => self.load_question(),
                QuizMode::Random => self.load_random_question(),
            },
            // A failed grading does not lock the draft, so the submission is
            // rebuilt and validated before any state changes.
            Step::Grading => self.submit_answer(),
        }
    }

    // ─── Resolution ────────────────────────────────────────────────────────────

    /// Apply a backend result for a previously issued request.
    pub fn resolve(
        &mut self,
        ticket: RequestTicket,
        result: Result<QuizResponse, StepError>,
    ) -> Resolution {
        if !self.is_current(ticket) {
            return Resolution::Stale;
        }

        let response = match result {
            Ok(response) => response,
            Err(err) => return self.fail(ticket.step, err),
        };

        match (ticket.step, response) {
            (Step::Users, QuizResponse::Users(users)) => {
                self.users = StepState::Ready(users);
                self.phase = Phase::SelectingUser;
                Resolution::Applied
            }
            (Step::Subjects, QuizResponse::Subjects(subjects)) => {
                self.subjects = StepState::Ready(subjects);
                self.phase = Phase::SelectingSubject;
                Resolution::Applied
            }
            (Step::Topics, QuizResponse::Topics(topics)) => {
                self.topics = StepState::Ready(topics);
                self.phase = Phase::SelectingTopic;
                Resolution::Applied
            }
            (Step::Question, QuizResponse::Question(question)) => {
                self.draft = Some(AnswerDraft::for_kind(question.kind));
                self.question = StepState::Ready(question);
                self.grading = StepState::Idle;
                self.phase = Phase::AnsweringQuestion;
                Resolution::Applied
            }
            (Step::Grading, QuizResponse::Grade(grade)) => {
                self.score = grade.score;
                let completed = grade.test_status.is_completed();
                self.grading = StepState::Ready(grade);
                if completed {
                    self.completed = true;
                    self.phase = Phase::Completed;
                    Resolution::Completed
                } else {
                    self.phase = Phase::Grading;
                    Resolution::Advance(AdvanceTicket {
                        session: self.session,
                    })
                }
            }
            (step, _) => self.fail(step, StepError::new(step, "unexpected response kind")),
        }
    }

    // ─── Internals ─────────────────────────────────────────────────────────────

    fn issue(&mut self, step: Step) -> RequestTicket {
        self.next_request += 1;
        self.latest[step.index()] = self.next_request;
        RequestTicket {
            step,
            id: self.next_request,
        }
    }

    fn is_current(&self, ticket: RequestTicket) -> bool {
        if self.latest[ticket.step.index()] != ticket.id {
            return false;
        }
        match ticket.step {
            Step::Users => self.users.is_loading(),
            Step::Subjects => self.subjects.is_loading(),
            Step::Topics => self.topics.is_loading(),
            Step::Question => self.question.is_loading(),
            Step::Grading => self.grading.is_loading(),
        }
    }

    fn fail(&mut self, step: Step, err: StepError) -> Resolution {
        let err = if err.step() == step {
            err
        } else {
            StepError::new(step, err.detail())
        };
        match step {
            Step::Users => self.users = StepState::Failed(err),
            Step::Subjects => self.subjects = StepState::Failed(err),
            Step::Topics => self.topics = StepState::Failed(err),
            Step::Question => self.question = StepState::Failed(err),
            Step::Grading => self.grading = StepState::Failed(err),
        }
        self.phase = Phase::Error(step);
        Resolution::Failed(step)
    }

    fn begin_subjects(&mut self, user: UserId) -> Pending {
        self.subjects = StepState::Loading;
        self.phase = Phase::SelectingSubject;
        Pending {
            ticket: self.issue(Step::Subjects),
            request: QuizRequest::Subjects { user },
        }
    }

    fn begin_topics(&mut self, user: UserId, subject: SubjectId) -> Pending {
        self.topics = StepState::Loading;
        self.phase = Phase::SelectingTopic;
        Pending {
            ticket: self.issue(Step::Topics),
            request: QuizRequest::Topics { user, subject },
        }
    }

    fn begin_question(&mut self, request: QuizRequest) -> Pending {
        self.question = StepState::Loading;
        self.grading = StepState::Idle;
        self.draft = None;
        Pending {
            ticket: self.issue(Step::Question),
            request,
        }
    }

    /// Drop the topic selection and everything that hangs off it.
    fn reset_topic(&mut self) {
        self.selected_topic = None;
        self.question = StepState::Idle;
        self.grading = StepState::Idle;
        self.draft = None;
        self.score = 0;
        self.completed = false;
        self.session += 1;
    }

    fn require_scope(&self) -> Result<QuizScope, FlowError> {
        let user = self.selected_user.clone().ok_or(FlowError::NoUser)?;
        let subject = self.selected_subject.clone().ok_or(FlowError::NoSubject)?;
        let topic = self.selected_topic.clone().ok_or(FlowError::NoTopic)?;
        Ok(QuizScope {
            user,
            subject,
            topic,
        })
    }

    fn editable_draft(&mut self) -> Result<&mut AnswerDraft, FlowError> {
        if self.answer_locked() {
            return Err(FlowError::AnswerLocked);
        }
        self.draft.as_mut().ok_or(FlowError::NoQuestion)
    }
}

impl Default for QuizFlow {
    fn default() -> Self {
        Self::guided()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
