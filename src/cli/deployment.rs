//! Deployment CLI arguments

use clap::{Args, Subcommand, ValueEnum};

use super::common::ServiceTargetArgs;

/// Deployment subcommands
#[derive(Subcommand, Debug)]
pub enum DeploymentAction {
    /// List deployments of a service
    #[command(visible_alias = "ls")]
    List(ServiceTargetArgs),

    /// Show a deployment (latest by default)
    Get(DeploymentGetArgs),

    /// Print or follow deployment logs
    #[command(visible_alias = "logs")]
    Log(DeploymentLogArgs),
}

/// Arguments for 'deployment get'
#[derive(Args, Debug, Clone, Default)]
pub struct DeploymentGetArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Deployment ID
    #[arg(long = "deployment-id")]
    pub deployment_id: Option<String>,
}

/// Arguments for 'deployment log'
#[derive(Args, Debug, Clone)]
pub struct DeploymentLogArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Deployment ID
    #[arg(long = "deployment-id")]
    pub deployment_id: Option<String>,

    /// Log type
    #[arg(short = 't', long = "type", value_enum, default_value_t = LogType::Runtime)]
    pub log_type: LogType,

    /// Keep polling for new lines
    #[arg(short = 'w', long, default_value_t = false)]
    pub watch: bool,
}

/// Log types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogType {
    Runtime,
    Build,
}

impl std::fmt::Display for LogType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogType::Runtime => write!(f, "runtime"),
            LogType::Build => write!(f, "build"),
        }
    }
}
