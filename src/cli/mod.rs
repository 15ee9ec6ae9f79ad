//! CLI argument parsing

mod auth;
mod common;
mod context;
mod deployment;
mod domain;
mod project;
mod service;
mod template;
mod variable;

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::config::{context as context_config, defaults};

pub use auth::AuthAction;
pub use common::{parse_key_value, OutputFormat, ProjectTargetArgs, ServiceTargetArgs};
pub use context::{ContextAction, ContextSetArgs, ContextTarget};
pub use deployment::{DeploymentAction, DeploymentGetArgs, DeploymentLogArgs, LogType};
pub use domain::{DomainAction, DomainCreateArgs, DomainDeleteArgs};
pub use project::{CreateProjectArgs, DeleteProjectArgs, ExportProjectArgs, ProjectAction};
pub use service::{MetricType, ServiceAction, ServiceConfirmArgs, ServiceListArgs, ServiceMetricArgs};
pub use template::{
    TemplateAction, TemplateCodeArgs, TemplateCreateArgs, TemplateDeleteArgs, TemplateDeployArgs,
    TemplateSearchArgs, TemplateUpdateArgs,
};
pub use variable::{VariableAction, VariableDeleteArgs, VariableEnvArgs, VariableSetArgs};

/// Zeabur command line client
#[derive(Parser, Debug)]
#[command(name = "zeabur")]
#[command(version)]
#[command(about = "Manage Zeabur projects, services and deployments", long_about = None)]
pub struct Cli {
    /// API token (overrides ZEABUR_TOKEN and the stored token)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Config file path
    #[arg(long, global = true, env = context_config::CONFIG_ENV_VAR)]
    pub config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "ZEABUR_LOG", default_value = defaults::LOG_LEVEL)]
    pub log_level: String,

    /// Prompt for missing parameters; pass false for scripts
    #[arg(
        short = 'i',
        long,
        global = true,
        action = ArgAction::Set,
        default_value_t = true
    )]
    pub interactive: bool,

    /// Output format
    #[arg(short = 'o', long, global = true, value_enum, default_value_t = OutputFormat::Table)]
    pub output: OutputFormat,

    /// Omit table headers
    #[arg(long, global = true, default_value_t = false)]
    pub no_header: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level resource nouns
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in, log out, show the current user
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Manage the current project, environment and service
    Context {
        #[command(subcommand)]
        action: ContextAction,
    },

    /// Manage projects
    Project {
        #[command(subcommand)]
        action: ProjectAction,
    },

    /// Manage services
    Service {
        #[command(subcommand)]
        action: ServiceAction,
    },

    /// Inspect deployments and their logs
    Deployment {
        #[command(subcommand)]
        action: DeploymentAction,
    },

    /// Manage service domains
    Domain {
        #[command(subcommand)]
        action: DomainAction,
    },

    /// Manage environment variables
    #[command(visible_alias = "var")]
    Variable {
        #[command(subcommand)]
        action: VariableAction,
    },

    /// Manage and deploy templates
    Template {
        #[command(subcommand)]
        action: TemplateAction,
    },
}

impl Command {
    /// Commands that work without an API token
    pub fn is_offline(&self) -> bool {
        matches!(
            self,
            Command::Context {
                action: ContextAction::Get | ContextAction::Clear
            } | Command::Auth {
                action: AuthAction::Logout | AuthAction::Login
            }
        )
    }
}
