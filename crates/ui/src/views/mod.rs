mod components;
mod flow;
mod home;
mod quiz;
mod state;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub use flow::{QuizHandle, use_quiz_flow};
pub use home::HomeView;
pub use quiz::QuizView;
pub use state::ViewError;
