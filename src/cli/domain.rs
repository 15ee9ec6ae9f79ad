//! Domain CLI arguments

use clap::{Args, Subcommand};

use super::common::ServiceTargetArgs;

/// Domain subcommands
#[derive(Subcommand, Debug)]
pub enum DomainAction {
    /// List domains bound to a service
    #[command(visible_alias = "ls")]
    List(ServiceTargetArgs),

    /// Bind a domain to a service
    Create(DomainCreateArgs),

    /// Remove a domain
    #[command(visible_alias = "rm")]
    Delete(DomainDeleteArgs),
}

/// Arguments for 'domain create'
#[derive(Args, Debug, Clone, Default)]
pub struct DomainCreateArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Domain name (for generated domains, the subdomain prefix)
    #[arg(long)]
    pub domain: Option<String>,

    /// Use a platform-generated domain
    #[arg(short = 'g', long, default_value_t = false)]
    pub generated: bool,

    /// Redirect this domain to another one
    #[arg(long)]
    pub redirect: Option<String>,
}

/// Arguments for 'domain delete'
#[derive(Args, Debug, Clone, Default)]
pub struct DomainDeleteArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Domain name
    #[arg(long)]
    pub domain: Option<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}
