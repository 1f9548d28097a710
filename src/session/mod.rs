mod controller;
mod run;


pub use controller::{DEFAULT_K, InitConfig, InitSummary, InteractionController, SessionState};
pub use run::{RunSession, StepOutcome};
