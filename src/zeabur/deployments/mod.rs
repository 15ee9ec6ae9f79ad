//! Deployment and log module

mod api;
mod commands;
mod models;
pub mod watch;

pub use commands::run_deployment_command;
pub use models::{Deployment, LogEntry};
