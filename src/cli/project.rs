//! Project CLI arguments

use clap::{Args, Subcommand};

use super::common::ProjectTargetArgs;

/// Project subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectAction {
    /// List all projects
    #[command(visible_alias = "ls")]
    List,

    /// Show a project and its environments
    Get(ProjectTargetArgs),

    /// Create a project
    Create(CreateProjectArgs),

    /// Delete a project
    #[command(visible_alias = "rm")]
    Delete(DeleteProjectArgs),

    /// Export a project environment as a template
    Export(ExportProjectArgs),
}

/// Arguments for 'project create'
#[derive(Args, Debug, Clone, Default)]
pub struct CreateProjectArgs {
    /// Project name (generated by the server when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Region ID
    #[arg(short = 'r', long)]
    pub region: Option<String>,
}

/// Arguments for 'project delete'
#[derive(Args, Debug, Clone, Default)]
pub struct DeleteProjectArgs {
    #[command(flatten)]
    pub target: ProjectTargetArgs,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'project export'
#[derive(Args, Debug, Clone, Default)]
pub struct ExportProjectArgs {
    #[command(flatten)]
    pub target: ProjectTargetArgs,

    /// Environment ID
    #[arg(long = "env-id")]
    pub env_id: Option<String>,
}
