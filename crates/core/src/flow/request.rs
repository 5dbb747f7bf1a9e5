use crate::flow::step::Step;
use crate::model::{AnswerSubmission, Grade, Question, Subject, SubjectId, Topic, TopicId, UserId};

/// Fully resolved user/subject/topic selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizScope {
    pub user: UserId,
    pub subject: SubjectId,
    pub topic: TopicId,
}

/// Identifies one issued request so late responses can be recognised.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    pub(crate) step: Step,
    pub(crate) id: u64,
}

impl RequestTicket {
    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }
}

/// Permission to load the next question once the post-grading delay ends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdvanceTicket {
    pub(crate) session: u64,
}

/// Backend call requested by a flow transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizRequest {
    Users,
    Subjects {
        user: UserId,
    },
    Topics {
        user: UserId,
        subject: SubjectId,
    },
    Question {
        scope: QuizScope,
    },
    RandomQuestion,
    Grade {
        scope: Option<QuizScope>,
        submission: AnswerSubmission,
    },
}

impl QuizRequest {
    #[must_use]
    pub fn step(&self) -> Step {
        match self {
            QuizRequest::Users => Step::Users,
            QuizRequest::Subjects { .. } => Step::Subjects,
            QuizRequest::Topics { .. } => Step::Topics,
            QuizRequest::Question { .. } | QuizRequest::RandomQuestion => Step::Question,
            QuizRequest::Grade { .. } => Step::Grading,
        }
    }
}

/// A request paired with the ticket its response must be resolved with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pending {
    pub ticket: RequestTicket,
    pub request: QuizRequest,
}

/// Successful backend payload for a [`QuizRequest`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizResponse {
    Users(Vec<UserId>),
    Subjects(Vec<Subject>),
    Topics(Vec<Topic>),
    Question(Question),
    Grade(Grade),
}

/// Outcome of feeding a response back into the flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Applied,
    /// The response belonged to a superseded request and was dropped.
    Stale,
    Failed(Step),
    /// Answer graded; load the next question after the delay.
    Advance(AdvanceTicket),
    Completed,
}
