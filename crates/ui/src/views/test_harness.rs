use std::sync::Arc;
use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use quiz_core::QuizFlow;
use services::QuizBackend;

use crate::context::{UiApp, build_app_context};
use crate::views::flow::QuizTestHandles;
use crate::views::{HomeView, QuizView};
use crate::vm::QuizIntent;

#[derive(Clone)]
struct TestApp {
    backend: Arc<dyn QuizBackend>,
}

impl UiApp for TestApp {
    fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend)
    }

    fn advance_delay(&self) -> Duration {
        Duration::ZERO
    }

    fn backend_label(&self) -> String {
        "test backend".to_string()
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    Quiz,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    handles: QuizTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

impl Eq for ViewHarnessProps {}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view);
    use_context_provider(|| props.handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    let view = use_context::<ViewKind>();
    match view {
        ViewKind::Home => rsx! { HomeView {} },
        ViewKind::Quiz => rsx! { QuizView {} },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    handles: QuizTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    /// Let spawned backend requests finish, then re-render.
    pub async fn drive_async(&mut self) {
        for _ in 0..6 {
            let _ = tokio::time::timeout(
                std::time::Duration::from_millis(50),
                self.dom.wait_for_work(),
            )
            .await;
            self.dom.render_immediate(&mut NoOpMutations);
            self.dom.process_events();
        }
    }

    pub async fn dispatch(&mut self, intent: QuizIntent) {
        let dispatch = self.handles.dispatch();
        self.dom.in_runtime(|| dispatch.call(intent));
        self.drive_async().await;
    }

    pub fn flow(&self) -> QuizFlow {
        let flow = self.handles.flow();
        self.dom.in_runtime(|| flow.read().clone())
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub fn setup_view_harness(view: ViewKind, backend: Arc<dyn QuizBackend>) -> ViewHarness {
    let handles = QuizTestHandles::default();
    let app = Arc::new(TestApp { backend });

    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view,
            handles: handles.clone(),
        },
    );

    ViewHarness { dom, handles }
}
