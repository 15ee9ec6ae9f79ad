//! Context management module
//!
//! The config file stores the API token, the logged-in user and the
//! current project, environment and service that commands default to.

mod commands;
mod models;
mod store;

pub use commands::{run_context_clear, run_context_command, run_context_get};
pub use models::{BasicInfo, CliConfig, Context};
pub use store::ConfigStore;
