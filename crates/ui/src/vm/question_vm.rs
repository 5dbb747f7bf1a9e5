use quiz_core::model::{AnswerStatus, QuestionKind};
use quiz_core::{QuizFlow, Step, StepState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChoiceVm {
    pub label: String,
    pub selected: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultVm {
    pub label: String,
    pub correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuestionVm {
    pub text: String,
    pub kind_label: &'static str,
    pub progress_label: Option<String>,
    pub choices: Vec<ChoiceVm>,
    /// Present for fill-in-the-blank questions only.
    pub text_input: Option<String>,
    pub locked: bool,
    pub grading: bool,
    pub grading_error: Option<&'static str>,
    pub result: Option<ResultVm>,
    pub score_label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizPanelVm {
    Hidden,
    Loading,
    Failed(&'static str),
    Question(QuestionVm),
    Completed {
        result: Option<ResultVm>,
        score_label: String,
    },
}

fn score_label(score: u32) -> String {
    format!("Score: {score}")
}

fn result_label(status: &AnswerStatus) -> ResultVm {
    match status {
        AnswerStatus::Correct => ResultVm {
            label: "Correct!".to_string(),
            correct: true,
        },
        AnswerStatus::Incorrect => ResultVm {
            label: "Incorrect".to_string(),
            correct: false,
        },
        AnswerStatus::Other(raw) => ResultVm {
            label: raw.clone(),
            correct: false,
        },
    }
}

#[must_use]
pub fn map_quiz_panel(flow: &QuizFlow) -> QuizPanelVm {
    let result = flow
        .grading()
        .ready()
        .map(|grade| result_label(&grade.answer_status));

    if flow.is_completed() {
        return QuizPanelVm::Completed {
            result,
            score_label: format!("Test completed! Final score: {}", flow.score()),
        };
    }

    let question = match flow.question() {
        StepState::Idle => return QuizPanelVm::Hidden,
        StepState::Loading => return QuizPanelVm::Loading,
        StepState::Failed(_) => return QuizPanelVm::Failed(Step::Question.failure_message()),
        StepState::Ready(question) => question,
    };

    let draft = flow.draft();
    let choices = question
        .display_options()
        .into_iter()
        .map(|label| ChoiceVm {
            selected: draft.is_some_and(|draft| draft.is_selected(&label)),
            label,
        })
        .collect();
    let text_input = (question.kind == QuestionKind::FillInTheBlank).then(|| {
        draft
            .and_then(|draft| draft.text())
            .unwrap_or_default()
            .to_string()
    });

    QuizPanelVm::Question(QuestionVm {
        text: question.text.clone(),
        kind_label: question.kind.label(),
        progress_label: question.progress_label(),
        choices,
        text_input,
        locked: flow.answer_locked(),
        grading: flow.grading().is_loading(),
        grading_error: flow
            .grading()
            .error()
            .map(|_| Step::Grading.failure_message()),
        result,
        score_label: score_label(flow.score()),
    })
}
