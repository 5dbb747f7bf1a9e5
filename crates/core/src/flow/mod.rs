//! Cascading selection and question/answer state machine.

mod request;
mod state;
mod step;

pub use request::{
    AdvanceTicket, Pending, QuizRequest, QuizResponse, QuizScope, RequestTicket, Resolution,
};
pub use state::{FlowError, QuizFlow, QuizMode};
pub use step::{Phase, Step, StepError, StepState};
