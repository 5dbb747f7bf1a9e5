use dioxus::prelude::*;
use dioxus_router::{Link, Outlet, Routable};

use crate::context::AppContext;
use crate::views::{HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            Sidebar {}
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}

#[component]
fn Sidebar() -> Element {
    let ctx = use_context::<AppContext>();

    rsx! {
        nav { class: "sidebar",
            h1 { "Quiz" }
            ul {
                li { Link { to: Route::Home {}, "Guided" } }
                li { Link { to: Route::Quiz {}, "Random quiz" } }
            }
            p { class: "sidebar__backend", "{ctx.backend_label()}" }
        }
    }
}
