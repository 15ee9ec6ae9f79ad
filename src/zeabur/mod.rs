//! Zeabur API client module
//!
//! One submodule per resource, each with its models, the GraphQL
//! operations (as `impl ZeaburClient` blocks) and the command handlers.

pub mod client;
mod credentials;
pub mod deployments;
pub mod domains;
pub mod environments;
pub mod helpers;
pub mod projects;
pub mod services;
pub mod templates;
pub mod traits;
pub mod user;
pub mod variables;

pub use client::ZeaburClient;
pub use credentials::TokenResolver;
pub use deployments::{run_deployment_command, Deployment, LogEntry};
pub use domains::{run_domain_command, Domain};
pub use environments::Environment;
pub use projects::{run_project_command, Project, Region};
pub use services::{run_service_command, Service, ServiceDetail};
pub use templates::{run_template_command, Template};
pub use traits::ZeaburResource;
pub use user::User;
pub use variables::{run_variable_command, Variable};
