//! Domain module

mod api;
mod commands;
mod models;

pub use commands::run_domain_command;
pub use models::{Domain, DomainAvailability};
