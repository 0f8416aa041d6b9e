pub mod config;
pub mod error;
pub mod state;
pub mod validator;
pub mod verdicts;
pub mod r#loop;

pub use error::{ConfigError, WatchError};
pub use r#loop::{CycleOutcome, PollLoop};
pub use state::{LoopState, PollCursor};
pub use validator::{StatusItem, ValidatedResponse};
pub use verdicts::KnownVerdicts;
