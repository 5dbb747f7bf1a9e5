use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::question::QuestionKind;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AnswerError {
    #[error("no answer selected")]
    NoAnswer,

    #[error("option {0:?} is not a valid true/false choice")]
    NotABoolean(String),

    #[error("free text is only accepted for fill-in-the-blank questions")]
    TextNotAccepted,
}

//
// ─── ANSWER DRAFT ──────────────────────────────────────────────────────────────
//

/// The answer being composed for the current question.
///
/// The variant always matches the question type it was created for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerDraft {
    /// Selected options in the order they were picked.
    Choices(Vec<String>),
    /// Free text, passed through exactly as typed.
    Text(String),
    /// Unset until the user picks true or false.
    Boolean(Option<bool>),
}

impl AnswerDraft {
    #[must_use]
    pub fn for_kind(kind: QuestionKind) -> Self {
        match kind {
            QuestionKind::MultipleChoice => AnswerDraft::Choices(Vec::new()),
            QuestionKind::FillInTheBlank => AnswerDraft::Text(String::new()),
            QuestionKind::TrueOrFalse => AnswerDraft::Boolean(None),
        }
    }

    /// Apply an option pick.
    ///
    /// Multiple-choice toggles membership; the other kinds overwrite the
    /// previous value.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::NotABoolean` when a true/false draft receives
    /// something other than `true`/`false` (any case). The draft is unchanged.
    pub fn select_option(&mut self, option: &str) -> Result<(), AnswerError> {
        match self {
            AnswerDraft::Choices(selected) => {
                if let Some(pos) = selected.iter().position(|item| item == option) {
                    selected.remove(pos);
                } else {
                    selected.push(option.to_string());
                }
            }
            AnswerDraft::Text(text) => {
                *text = option.to_string();
            }
            AnswerDraft::Boolean(choice) => {
                *choice = Some(parse_bool(option)?);
            }
        }
        Ok(())
    }

    /// Overwrite the free-text answer.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::TextNotAccepted` for non fill-in drafts.
    pub fn set_text(&mut self, value: impl Into<String>) -> Result<(), AnswerError> {
        match self {
            AnswerDraft::Text(text) => {
                *text = value.into();
                Ok(())
            }
            _ => Err(AnswerError::TextNotAccepted),
        }
    }

    #[must_use]
    pub fn is_selected(&self, option: &str) -> bool {
        match self {
            AnswerDraft::Choices(selected) => selected.iter().any(|item| item == option),
            AnswerDraft::Text(text) => text == option,
            AnswerDraft::Boolean(choice) => {
                choice.is_some_and(|value| parse_bool(option).is_ok_and(|parsed| parsed == value))
            }
        }
    }

    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            AnswerDraft::Text(text) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Encode the draft into the string sent for grading.
    ///
    /// # Errors
    ///
    /// Returns `AnswerError::NoAnswer` for an empty multiple-choice selection
    /// or an unset true/false choice. Free text is never rejected.
    pub fn encode(&self) -> Result<String, AnswerError> {
        match self {
            AnswerDraft::Choices(selected) if selected.is_empty() => Err(AnswerError::NoAnswer),
            AnswerDraft::Choices(selected) => Ok(selected.join(",")),
            AnswerDraft::Text(text) => Ok(text.clone()),
            AnswerDraft::Boolean(None) => Err(AnswerError::NoAnswer),
            AnswerDraft::Boolean(Some(true)) => Ok("True".to_string()),
            AnswerDraft::Boolean(Some(false)) => Ok("False".to_string()),
        }
    }
}

fn parse_bool(option: &str) -> Result<bool, AnswerError> {
    if option.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if option.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(AnswerError::NotABoolean(option.to_string()))
    }
}

//
// ─── SUBMISSION ────────────────────────────────────────────────────────────────
//

/// Payload sent to the grading endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerSubmission {
    pub question: String,
    pub answer: String,
}

impl AnswerSubmission {
    /// # Errors
    ///
    /// Propagates `AnswerError` from [`AnswerDraft::encode`].
    pub fn from_draft(question: &str, draft: &AnswerDraft) -> Result<Self, AnswerError> {
        Ok(Self {
            question: question.to_string(),
            answer: draft.encode()?,
        })
    }
}
