//! Service module

mod api;
mod commands;
mod models;

pub use api::ServiceMutation;
pub use commands::run_service_command;
pub use models::{
    GitTrigger, MetricSample, ProjectRef, Service, ServiceDetail, ServiceInstruction, TempTcpPort,
};
