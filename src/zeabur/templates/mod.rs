//! Template module

mod api;
mod commands;
mod models;

pub use commands::run_template_command;
pub use models::{DeployedProject, Template};
