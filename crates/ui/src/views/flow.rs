use std::sync::Arc;
use std::time::Duration;

use dioxus::prelude::*;
use quiz_core::{Pending, QuizFlow, QuizMode};
use services::{FlowHandle, QuizBackend, drive};

use crate::context::AppContext;
use crate::views::ViewError;
use crate::vm::{QuizIntent, apply_intent};

#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct QuizHandle {
    pub flow: Signal<QuizFlow>,
    pub notice: Signal<Option<ViewError>>,
    pub dispatch: Callback<QuizIntent>,
}

/// Own a `QuizFlow` for the calling view and run its requests.
pub fn use_quiz_flow(mode: QuizMode) -> QuizHandle {
    let ctx = use_context::<AppContext>();
    let flow = use_signal(|| QuizFlow::new(mode));
    let notice = use_signal(|| None::<ViewError>);

    let dispatch = use_callback(move |intent: QuizIntent| {
        let mut flow = flow;
        let mut notice = notice;

        let outcome = apply_intent(&mut flow.write(), intent);
        match outcome {
            Ok(pending) => {
                notice.set(None);
                if let Some(pending) = pending {
                    spawn_request(ctx.backend(), ctx.advance_delay(), flow, pending);
                }
            }
            Err(err) => {
                tracing::debug!(error = %err, "quiz intent rejected");
                notice.set(Some(ViewError::from(&err)));
            }
        }
    });

    #[cfg(test)]
    use_hook(|| {
        if let Some(handles) = try_consume_context::<QuizTestHandles>() {
            handles.register(dispatch, flow);
        }
    });

    QuizHandle {
        flow,
        notice,
        dispatch,
    }
}

struct FlowSignal(Signal<QuizFlow>);

impl FlowHandle for FlowSignal {
    fn update<R>(&mut self, f: impl FnOnce(&mut QuizFlow) -> R) -> R {
        f(&mut *self.0.write())
    }
}

/// Run `pending` on a task owned by the view; leaving the page drops it.
///
/// A reset or a newer selection turns the advance ticket stale and ends the
/// loop.
fn spawn_request(
    backend: Arc<dyn QuizBackend>,
    delay: Duration,
    flow: Signal<QuizFlow>,
    pending: Pending,
) {
    spawn(async move {
        let mut handle = FlowSignal(flow);
        drive(backend.as_ref(), &mut handle, delay, pending).await;
    });
}

#[cfg(test)]
#[derive(Clone, Default)]
pub(crate) struct QuizTestHandles {
    dispatch: Rc<RefCell<Option<Callback<QuizIntent>>>>,
    flow: Rc<RefCell<Option<Signal<QuizFlow>>>>,
}

#[cfg(test)]
impl QuizTestHandles {
    pub(crate) fn register(&self, dispatch: Callback<QuizIntent>, flow: Signal<QuizFlow>) {
        *self.dispatch.borrow_mut() = Some(dispatch);
        *self.flow.borrow_mut() = Some(flow);
    }

    pub(crate) fn dispatch(&self) -> Callback<QuizIntent> {
        (*self.dispatch.borrow()).expect("quiz dispatch registered")
    }

    pub(crate) fn flow(&self) -> Signal<QuizFlow> {
        (*self.flow.borrow()).expect("quiz flow registered")
    }
}
