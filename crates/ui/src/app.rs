use dioxus::prelude::*;
use dioxus_router::Router;

use crate::context::AppContext;
use crate::routes::Route;

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let title = format!("Quiz ({})", ctx.backend_label());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "{title}" }

        div { class: "app-root quiz-app",
            ErrorBoundary {
                handle_error: move |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "The quiz stopped unexpectedly" }
                        p { "Restart the app to begin a new session." }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
