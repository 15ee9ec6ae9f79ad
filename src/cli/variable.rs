//! Variable CLI arguments

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::common::{parse_key_value, ServiceTargetArgs};

/// Variable subcommands
#[derive(Subcommand, Debug)]
pub enum VariableAction {
    /// List environment variables of a service
    #[command(visible_alias = "ls")]
    List(ServiceTargetArgs),

    /// Add new variables
    Create(VariableSetArgs),

    /// Change existing variables
    Update(VariableSetArgs),

    /// Remove variables
    #[command(visible_alias = "rm")]
    Delete(VariableDeleteArgs),

    /// Replace all variables with the contents of a .env file
    Env(VariableEnvArgs),
}

/// Arguments for 'variable create' and 'variable update'
#[derive(Args, Debug, Clone, Default)]
pub struct VariableSetArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// KEY=VALUE pair, repeatable
    #[arg(short = 'k', long = "key", value_parser = parse_key_value, required = true)]
    pub keys: Vec<(String, String)>,
}

/// Arguments for 'variable delete'
#[derive(Args, Debug, Clone, Default)]
pub struct VariableDeleteArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Keys to delete, comma separated
    #[arg(long = "delete-keys", value_delimiter = ',', required = true)]
    pub delete_keys: Vec<String>,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'variable env'
#[derive(Args, Debug, Clone)]
pub struct VariableEnvArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Path to the .env file
    #[arg(short = 'f', long, default_value = ".env")]
    pub file: PathBuf,
}
