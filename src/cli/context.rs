//! Context CLI arguments

use clap::{Args, Subcommand};

/// Context subcommands
#[derive(Subcommand, Debug)]
pub enum ContextAction {
    /// Show the current project, environment and service
    Get,

    /// Set the current project, environment or service
    Set {
        #[command(subcommand)]
        target: ContextTarget,
    },

    /// Clear the whole context
    Clear,
}

/// Which context slot to set
#[derive(Subcommand, Debug)]
pub enum ContextTarget {
    /// Set the current project (clears environment and service)
    Project(ContextSetArgs),

    /// Set the current environment
    #[command(visible_alias = "env")]
    Environment(ContextSetArgs),

    /// Set the current service
    Service(ContextSetArgs),
}

/// Arguments for 'context set <target>'
#[derive(Args, Debug, Clone, Default)]
pub struct ContextSetArgs {
    /// Resource ID
    #[arg(long)]
    pub id: Option<String>,

    /// Resource name
    #[arg(long)]
    pub name: Option<String>,
}
