//! Template CLI arguments

use std::path::PathBuf;

use clap::{Args, Subcommand};

use super::common::parse_key_value;

/// Template subcommands
#[derive(Subcommand, Debug)]
pub enum TemplateAction {
    /// List your templates
    #[command(visible_alias = "ls")]
    List,

    /// Search all templates by name or description
    Search(TemplateSearchArgs),

    /// Show a template
    Get(TemplateCodeArgs),

    /// Delete a template
    #[command(visible_alias = "rm")]
    Delete(TemplateDeleteArgs),

    /// Create a template from a YAML file
    Create(TemplateCreateArgs),

    /// Replace a template with a YAML file
    Update(TemplateUpdateArgs),

    /// Deploy a template file into a project
    Deploy(TemplateDeployArgs),
}

/// Template code
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateCodeArgs {
    /// Template code
    #[arg(short = 'c', long)]
    pub code: Option<String>,
}

/// Arguments for 'template search'
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateSearchArgs {
    /// Case-insensitive keyword; prompted for when omitted
    pub keyword: Option<String>,
}

/// Arguments for 'template delete'
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateDeleteArgs {
    #[command(flatten)]
    pub code: TemplateCodeArgs,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'template create'
#[derive(Args, Debug, Clone)]
pub struct TemplateCreateArgs {
    /// Template YAML file
    #[arg(short = 'f', long)]
    pub file: PathBuf,
}

/// Arguments for 'template update'
#[derive(Args, Debug, Clone)]
pub struct TemplateUpdateArgs {
    /// Template code
    #[arg(short = 'c', long)]
    pub code: String,

    /// Template YAML file
    #[arg(short = 'f', long)]
    pub file: PathBuf,
}

/// Arguments for 'template deploy'
#[derive(Args, Debug, Clone)]
pub struct TemplateDeployArgs {
    /// Template YAML file
    #[arg(short = 'f', long)]
    pub file: PathBuf,

    /// Target project ID (defaults to the current project)
    #[arg(long = "project-id")]
    pub project_id: Option<String>,

    /// Template variable as KEY=VALUE, repeatable
    #[arg(short = 'k', long = "var", value_parser = parse_key_value)]
    pub vars: Vec<(String, String)>,
}
