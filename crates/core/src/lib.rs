#![forbid(unsafe_code)]

pub mod flow;
pub mod model;

pub use flow::{
    AdvanceTicket, FlowError, Pending, Phase, QuizFlow, QuizMode, QuizRequest, QuizResponse,
    QuizScope, RequestTicket, Resolution, Step, StepError, StepState,
};
