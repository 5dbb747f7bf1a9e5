use serde::{Deserialize, Serialize};

//
// ─── QUESTION TYPE ─────────────────────────────────────────────────────────────
//

/// Classification of a quiz item.
///
/// Controls which answer input is shown and how the answer is encoded
/// for grading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuestionKind {
    #[serde(
        rename = "multiple-choice",
        alias = "multiple_choice",
        alias = "mcq"
    )]
    MultipleChoice,
    #[serde(
        rename = "fill-in-the-blank",
        alias = "fill_in_the_blank",
        alias = "fill-in-the-blanks"
    )]
    FillInTheBlank,
    #[serde(
        rename = "true-or-false",
        alias = "true_or_false",
        alias = "true-false"
    )]
    TrueOrFalse,
}

impl QuestionKind {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            QuestionKind::MultipleChoice => "Multiple choice",
            QuestionKind::FillInTheBlank => "Fill in the blank",
            QuestionKind::TrueOrFalse => "True or false",
        }
    }
}

//
// ─── TEST STATUS ───────────────────────────────────────────────────────────────
//

/// Whether the backend still has questions for the current test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TestStatus {
    #[default]
    #[serde(rename = "in-progress", alias = "in_progress", alias = "ongoing")]
    InProgress,
    #[serde(rename = "completed", alias = "complete")]
    Completed,
}

impl TestStatus {
    #[must_use]
    pub fn is_completed(self) -> bool {
        matches!(self, TestStatus::Completed)
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A single quiz question as served by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    #[serde(rename = "question", alias = "text")]
    pub text: String,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(rename = "type")]
    pub kind: QuestionKind,
    #[serde(rename = "test_status", alias = "status", default)]
    pub status: TestStatus,
    #[serde(rename = "question_index", alias = "index", default)]
    pub index: u32,
    #[serde(rename = "total_questions", alias = "total", default)]
    pub total: u32,
}

impl Question {
    /// Options offered for this question.
    ///
    /// True/false questions always expose `True` and `False`, even when the
    /// backend leaves `options` empty.
    #[must_use]
    pub fn display_options(&self) -> Vec<String> {
        if self.kind == QuestionKind::TrueOrFalse && self.options.is_empty() {
            return vec!["True".to_string(), "False".to_string()];
        }
        self.options.clone()
    }

    /// One-based position label, `None` when the backend sends no totals.
    #[must_use]
    pub fn progress_label(&self) -> Option<String> {
        if self.total == 0 {
            return None;
        }
        Some(format!("Question {} of {}", self.index, self.total))
    }
}

//
// ─── GRADING ───────────────────────────────────────────────────────────────────
//

/// Correctness verdict returned by the grading endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum AnswerStatus {
    Correct,
    Incorrect,
    /// Any other verdict string, kept verbatim for display.
    Other(String),
}

impl From<String> for AnswerStatus {
    fn from(value: String) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "correct" | "right" | "true" => AnswerStatus::Correct,
            "incorrect" | "wrong" | "false" => AnswerStatus::Incorrect,
            _ => AnswerStatus::Other(value),
        }
    }
}

impl From<AnswerStatus> for String {
    fn from(value: AnswerStatus) -> Self {
        match value {
            AnswerStatus::Correct => "correct".to_string(),
            AnswerStatus::Incorrect => "incorrect".to_string(),
            AnswerStatus::Other(raw) => raw,
        }
    }
}

impl AnswerStatus {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        matches!(self, AnswerStatus::Correct)
    }
}

/// Grading result for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grade {
    pub answer_status: AnswerStatus,
    #[serde(default)]
    pub score: u32,
    #[serde(default)]
    pub test_status: TestStatus,
}
