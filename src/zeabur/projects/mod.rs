//! Project module

mod api;
mod commands;
mod models;

pub use commands::run_project_command;
pub use models::{ExportedTemplate, Project, Region};
