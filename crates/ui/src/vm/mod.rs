mod question_vm;
mod quiz_vm;
mod selection_vm;

pub use question_vm::{ChoiceVm, QuestionVm, QuizPanelVm, ResultVm, map_quiz_panel};
pub use quiz_vm::{QuizIntent, apply_intent};
pub use selection_vm::{
    DropdownOptionVm, DropdownStatus, DropdownVm, map_subject_dropdown, map_topic_dropdown,
    map_user_dropdown,
};
