use std::sync::Arc;
use std::time::Duration;

use services::QuizBackend;

pub trait UiApp: Send + Sync {
    fn backend(&self) -> Arc<dyn QuizBackend>;

    /// Pause between a graded answer and the next question.
    fn advance_delay(&self) -> Duration;

    /// Short description of where questions come from, shown in the sidebar.
    fn backend_label(&self) -> String;
}

#[derive(Clone)]
pub struct AppContext {
    backend: Arc<dyn QuizBackend>,
    advance_delay: Duration,
    backend_label: String,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            backend: app.backend(),
            advance_delay: app.advance_delay(),
            backend_label: app.backend_label(),
        }
    }

    #[must_use]
    pub fn backend(&self) -> Arc<dyn QuizBackend> {
        Arc::clone(&self.backend)
    }

    #[must_use]
    pub fn advance_delay(&self) -> Duration {
        self.advance_delay
    }

    #[must_use]
    pub fn backend_label(&self) -> &str {
        &self.backend_label
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
