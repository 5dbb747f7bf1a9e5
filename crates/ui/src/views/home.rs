use dioxus::prelude::*;
use quiz_core::QuizMode;

use crate::views::components::{Dropdown, QuestionPanel};
use crate::views::flow::use_quiz_flow;
use crate::vm::{
    QuizIntent, map_quiz_panel, map_subject_dropdown, map_topic_dropdown, map_user_dropdown,
};

/// Guided quiz: user, then subject, then topic, then questions.
#[component]
pub fn HomeView() -> Element {
    let quiz = use_quiz_flow(QuizMode::Guided);
    let dispatch = quiz.dispatch;
    use_effect(move || dispatch.call(QuizIntent::LoadUsers));

    let flow = quiz.flow.read();
    let users = map_user_dropdown(&flow);
    let subjects = map_subject_dropdown(&flow);
    let topics = map_topic_dropdown(&flow);
    let panel = map_quiz_panel(&flow);
    let notice = *quiz.notice.read();

    rsx! {
        div { class: "page quiz-page",
            h2 { "Quiz" }
            div { class: "quiz-selectors",
                Dropdown {
                    vm: users,
                    on_select: move |value| dispatch.call(QuizIntent::SelectUser(value)),
                    on_retry: move |step| dispatch.call(QuizIntent::Retry(step)),
                }
                Dropdown {
                    vm: subjects,
                    on_select: move |value| dispatch.call(QuizIntent::SelectSubject(value)),
                    on_retry: move |step| dispatch.call(QuizIntent::Retry(step)),
                }
                Dropdown {
                    vm: topics,
                    on_select: move |value| dispatch.call(QuizIntent::SelectTopic(value)),
                    on_retry: move |step| dispatch.call(QuizIntent::Retry(step)),
                }
            }
            QuestionPanel {
                vm: panel,
                notice,
                on_intent: move |intent| dispatch.call(intent),
            }
        }
    }
}
