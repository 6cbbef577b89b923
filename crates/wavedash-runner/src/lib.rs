pub mod config;
pub mod error;
pub mod script;
pub mod session;

pub use config::RunnerConfig;
pub use error::RunnerError;
pub use script::InputScript;
pub use session::{SessionHandle, SessionSettings, SessionSummary, ShellCommand, spawn_session};
