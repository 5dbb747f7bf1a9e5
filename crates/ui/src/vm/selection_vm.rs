use quiz_core::{QuizFlow, Step, StepState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DropdownStatus {
    /// An upstream selection is missing.
    Hidden,
    Loading,
    Ready,
    Failed(&'static str),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownOptionVm {
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DropdownVm {
    pub id: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub step: Step,
    pub status: DropdownStatus,
    pub options: Vec<DropdownOptionVm>,
    /// Empty when nothing is selected, which keeps the placeholder shown.
    pub selected: String,
}

impl DropdownVm {
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.status != DropdownStatus::Hidden
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.status == DropdownStatus::Ready && self.options.is_empty()
    }
}

fn status_of<T>(state: &StepState<T>, step: Step) -> DropdownStatus {
    match state {
        StepState::Idle => DropdownStatus::Hidden,
        StepState::Loading => DropdownStatus::Loading,
        StepState::Ready(_) => DropdownStatus::Ready,
        StepState::Failed(_) => DropdownStatus::Failed(step.failure_message()),
    }
}

#[must_use]
pub fn map_user_dropdown(flow: &QuizFlow) -> DropdownVm {
    let options = flow
        .users()
        .ready()
        .map(|users| {
            users
                .iter()
                .map(|user| DropdownOptionVm {
                    value: user.as_str().to_string(),
                    label: user.to_string(),
                })
                .collect()
        })
        .unwrap_or_default();

    DropdownVm {
        id: "quiz-user",
        label: "User",
        placeholder: "Select a user",
        step: Step::Users,
        status: status_of(flow.users(), Step::Users),
        options,
        selected: flow
            .selected_user()
            .map(|user| user.as_str().to_string())
            .unwrap_or_default(),
    }
}

#[must_use]
pub fn map_subject_dropdown(flow: &QuizFlow) -> DropdownVm {
    let options = flow
        .subjects()
        .ready()
        .map(|subjects| {
            subjects
                .iter()
                .map(|subject| DropdownOptionVm {
                    value: subject.id.as_str().to_string(),
                    label: subject.name.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    DropdownVm {
        id: "quiz-subject",
        label: "Subject",
        placeholder: "Select a subject",
        step: Step::Subjects,
        status: status_of(flow.subjects(), Step::Subjects),
        options,
        selected: flow
            .selected_subject()
            .map(|subject| subject.as_str().to_string())
            .unwrap_or_default(),
    }
}

#[must_use]
pub fn map_topic_dropdown(flow: &QuizFlow) -> DropdownVm {
    let options = flow
        .topics()
        .ready()
        .map(|topics| {
            topics
                .iter()
                .map(|topic| DropdownOptionVm {
                    value: topic.id.as_str().to_string(),
                    label: topic.name.clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    DropdownVm {
        id: "quiz-topic",
        label: "Topic",
        placeholder: "Select a topic",
        step: Step::Topics,
        status: status_of(flow.topics(), Step::Topics),
        options,
        selected: flow
            .selected_topic()
            .map(|topic| topic.as_str().to_string())
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{Subject, UserId};
    use quiz_core::{QuizResponse, StepError};

    fn flow_with_users() -> QuizFlow {
        let mut flow = QuizFlow::guided();
        let pending = flow.load_users();
        flow.resolve(
            pending.ticket,
            Ok(QuizResponse::Users(vec![
                UserId::new("alice"),
                UserId::new("bob"),
            ])),
        );
        flow
    }

    #[test]
    fn fresh_flow_hides_dropdowns() {
        let flow = QuizFlow::guided();
        assert!(!map_user_dropdown(&flow).is_visible());
        assert!(!map_subject_dropdown(&flow).is_visible());
    }

    #[test]
    fn users_map_to_options_with_placeholder() {
        let flow = flow_with_users();
        let vm = map_user_dropdown(&flow);
        assert_eq!(vm.status, DropdownStatus::Ready);
        assert_eq!(vm.placeholder, "Select a user");
        assert_eq!(vm.options.len(), 2);
        assert_eq!(vm.options[1].value, "bob");
        assert!(vm.selected.is_empty());
    }

    #[test]
    fn selecting_user_marks_subjects_loading() {
        let mut flow = flow_with_users();
        let _ = flow.select_user(UserId::new("alice"));

        assert_eq!(map_user_dropdown(&flow).selected, "alice");
        assert_eq!(map_subject_dropdown(&flow).status, DropdownStatus::Loading);
        assert!(!map_topic_dropdown(&flow).is_visible());
    }

    #[test]
    fn subject_failure_only_touches_subject_dropdown() {
        let mut flow = flow_with_users();
        let pending = flow.select_user(UserId::new("alice")).unwrap();
        flow.resolve(pending.ticket, Err(StepError::new(Step::Subjects, "down")));

        assert_eq!(map_user_dropdown(&flow).status, DropdownStatus::Ready);
        assert_eq!(
            map_subject_dropdown(&flow).status,
            DropdownStatus::Failed("Failed to fetch subjects. Please try again later.")
        );
    }

    #[test]
    fn subject_labels_use_display_names() {
        let mut flow = flow_with_users();
        let pending = flow.select_user(UserId::new("alice")).unwrap();
        flow.resolve(
            pending.ticket,
            Ok(QuizResponse::Subjects(vec![Subject::new("math", "Mathematics")])),
        );

        let vm = map_subject_dropdown(&flow);
        assert_eq!(vm.options[0].value, "math");
        assert_eq!(vm.options[0].label, "Mathematics");
        assert!(!vm.is_empty());
    }
}
