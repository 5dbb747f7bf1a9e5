#![forbid(unsafe_code)]

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod memory;

pub use backend::{HttpQuizBackend, QuizBackend};
pub use config::{ADVANCE_DELAY, BACKEND_URL_ENV, BackendConfig, DEFAULT_BACKEND_URL};
pub use controller::{FlowHandle, QuizFlowController, advance_step, drive, execute, run_step};
pub use error::{ConfigError, QuizApiError};
pub use memory::{Endpoint, InMemoryQuizBackend, QuizItem};
