mod answer;
mod catalog;
mod ids;
mod question;

pub use answer::{AnswerDraft, AnswerError, AnswerSubmission};
pub use catalog::{Subject, Topic};
pub use ids::{SubjectId, TopicId, UserId};
pub use question::{AnswerStatus, Grade, Question, QuestionKind, TestStatus};
