use std::fmt;

/// One network-backed stage of the quiz flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    Users,
    Subjects,
    Topics,
    Question,
    Grading,
}

impl Step {
    pub(crate) fn index(self) -> usize {
        match self {
            Step::Users => 0,
            Step::Subjects => 1,
            Step::Topics => 2,
            Step::Question => 3,
            Step::Grading => 4,
        }
    }

    /// User-facing message shown in place of the step's widget on failure.
    #[must_use]
    pub fn failure_message(self) -> &'static str {
        match self {
            Step::Users => "Failed to fetch users. Please try again later.",
            Step::Subjects => "Failed to fetch subjects. Please try again later.",
            Step::Topics => "Failed to fetch topics. Please try again later.",
            Step::Question => "Failed to fetch the question. Please try again later.",
            Step::Grading => "Failed to check the answer. Please try again later.",
        }
    }
}

/// Failure of a single step, kept local to that step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepError {
    step: Step,
    detail: String,
}

impl StepError {
    #[must_use]
    pub fn new(step: Step, detail: impl Into<String>) -> Self {
        Self {
            step,
            detail: detail.into(),
        }
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    /// Diagnostic detail (transport error, status code). Not shown to users.
    #[must_use]
    pub fn detail(&self) -> &str {
        &self.detail
    }

    #[must_use]
    pub fn message(&self) -> &'static str {
        self.step.failure_message()
    }
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for StepError {}

/// Load state of one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum StepState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Failed(StepError),
}

impl<T> StepState<T> {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, StepState::Loading)
    }

    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            StepState::Ready(value) => Some(value),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&StepError> {
        match self {
            StepState::Failed(err) => Some(err),
            _ => None,
        }
    }
}

/// Coarse position in the quiz session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    SelectingUser,
    SelectingSubject,
    SelectingTopic,
    AnsweringQuestion,
    Grading,
    Completed,
    /// The named step failed; earlier selections are kept.
    Error(Step),
}
