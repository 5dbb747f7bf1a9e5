use quiz_core::FlowError;
use quiz_core::model::AnswerError;

/// Inline notice for an intent the flow rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewError {
    NoAnswer,
    AnswerLocked,
    Finished,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            ViewError::NoAnswer => "Choose an answer before submitting.",
            ViewError::AnswerLocked => "This answer has already been submitted.",
            ViewError::Finished => "The test is already completed.",
            ViewError::Unknown => "Something went wrong. Please try again.",
        }
    }
}

impl From<&FlowError> for ViewError {
    fn from(err: &FlowError) -> Self {
        match err {
            FlowError::Answer(AnswerError::NoAnswer) => ViewError::NoAnswer,
            FlowError::AnswerLocked => ViewError::AnswerLocked,
            FlowError::Completed => ViewError::Finished,
            _ => ViewError::Unknown,
        }
    }
}
