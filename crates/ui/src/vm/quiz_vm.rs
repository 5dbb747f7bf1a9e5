use quiz_core::model::{SubjectId, TopicId, UserId};
use quiz_core::{FlowError, Pending, QuizFlow, Step};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    LoadUsers,
    SelectUser(String),
    SelectSubject(String),
    SelectTopic(String),
    SelectOption(String),
    SetText(String),
    Submit,
    Retry(Step),
    StartRandom,
}

/// Apply a UI intent to the flow.
///
/// Returns the backend request to run, if any. Picking a dropdown's
/// placeholder (an empty value) is ignored.
///
/// # Errors
///
/// Returns the `FlowError` of a rejected transition; the flow is unchanged.
pub fn apply_intent(flow: &mut QuizFlow, intent: QuizIntent) -> Result<Option<Pending>, FlowError> {
    match intent {
        QuizIntent::LoadUsers => Ok(Some(flow.load_users())),
        QuizIntent::SelectUser(value) if value.is_empty() => Ok(None),
        QuizIntent::SelectUser(value) => Ok(flow.select_user(UserId::new(value))),
        QuizIntent::SelectSubject(value) if value.is_empty() => Ok(None),
        QuizIntent::SelectSubject(value) => flow.select_subject(SubjectId::new(value)),
        QuizIntent::SelectTopic(value) if value.is_empty() => Ok(None),
        QuizIntent::SelectTopic(value) => flow.select_topic(TopicId::new(value)),
        QuizIntent::SelectOption(option) => flow.select_option(&option).map(|()| None),
        QuizIntent::SetText(text) => flow.set_text(text).map(|()| None),
        QuizIntent::Submit => flow.submit_answer().map(Some),
        QuizIntent::Retry(step) => flow.retry(step).map(Some),
        QuizIntent::StartRandom => flow.load_random_question().map(Some),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerError, Question, QuestionKind, TestStatus};
    use quiz_core::{QuizRequest, QuizResponse};

    #[test]
    fn placeholder_selection_is_ignored() {
        let mut flow = QuizFlow::guided();
        let before = flow.clone();
        let pending = apply_intent(&mut flow, QuizIntent::SelectUser(String::new())).unwrap();
        assert!(pending.is_none());
        assert_eq!(flow, before);
    }

    #[test]
    fn selecting_user_requests_subjects() {
        let mut flow = QuizFlow::guided();
        let pending = apply_intent(&mut flow, QuizIntent::SelectUser("alice".into()))
            .unwrap()
            .unwrap();
        assert_eq!(
            pending.request,
            QuizRequest::Subjects {
                user: UserId::new("alice")
            }
        );
    }

    #[test]
    fn subject_without_user_is_rejected() {
        let mut flow = QuizFlow::guided();
        let err = apply_intent(&mut flow, QuizIntent::SelectSubject("math".into())).unwrap_err();
        assert_eq!(err, FlowError::NoUser);
    }

    #[test]
    fn empty_submission_is_rejected() {
        let mut flow = QuizFlow::random();
        let pending = apply_intent(&mut flow, QuizIntent::StartRandom)
            .unwrap()
            .unwrap();
        flow.resolve(
            pending.ticket,
            Ok(QuizResponse::Question(Question {
                text: "Pick".to_string(),
                options: vec!["A".to_string()],
                kind: QuestionKind::MultipleChoice,
                status: TestStatus::InProgress,
                index: 1,
                total: 1,
            })),
        );

        let err = apply_intent(&mut flow, QuizIntent::Submit).unwrap_err();
        assert_eq!(err, FlowError::Answer(AnswerError::NoAnswer));

        assert!(
            apply_intent(&mut flow, QuizIntent::SelectOption("A".into()))
                .unwrap()
                .is_none()
        );
        assert!(apply_intent(&mut flow, QuizIntent::Submit).unwrap().is_some());
    }
}
