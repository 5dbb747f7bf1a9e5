use dioxus::prelude::*;
use quiz_core::QuizMode;

use crate::views::components::QuestionPanel;
use crate::views::flow::use_quiz_flow;
use crate::vm::{QuizIntent, QuizPanelVm, map_quiz_panel};

/// Standalone quiz of random questions, no selections needed.
#[component]
pub fn QuizView() -> Element {
    let quiz = use_quiz_flow(QuizMode::Random);
    let dispatch = quiz.dispatch;

    let flow = quiz.flow.read();
    let panel = map_quiz_panel(&flow);
    let notice = *quiz.notice.read();
    let idle = panel == QuizPanelVm::Hidden;

    rsx! {
        div { class: "page quiz-page",
            h2 { "Random quiz" }
            if idle {
                p { "Answer random questions until the backend ends the test." }
                button {
                    class: "btn btn-primary",
                    id: "quiz-start",
                    r#type: "button",
                    onclick: move |_| dispatch.call(QuizIntent::StartRandom),
                    "Start"
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
