//! Context command handlers

use log::{debug, info};
use serde::Serialize;

use crate::cli::{ContextAction, ContextSetArgs, ContextTarget, OutputFormat};
use crate::error::CliError;
use crate::output::common::or_not_set;
use crate::output::{output_structured, print_table, OutputOptions};
use crate::resolve::SelectServiceOptions;
use crate::session::Session;
use crate::ui::{create_spinner, finish_spinner};
use crate::zeabur::ZeaburResource;

use super::models::{BasicInfo, CliConfig, Context};

/// One slot of the context as printed by `context get`
#[derive(Debug, Serialize, PartialEq, Eq)]
struct ContextRow {
    context: &'static str,
    name: String,
    id: String,
}

fn context_rows(ctx: &Context) -> Vec<ContextRow> {
    [
        ("Project", ctx.project()),
        ("Environment", ctx.environment()),
        ("Service", ctx.service()),
    ]
    .into_iter()
    .map(|(context, info)| ContextRow {
        context,
        name: info.name.clone(),
        id: info.id.clone(),
    })
    .collect()
}

/// Print the current context; needs no API access
pub fn run_context_get(config: &CliConfig, output: &OutputOptions) {
    let rows = context_rows(&config.context);
    match output.format {
        OutputFormat::Table => {
            let rows = rows
                .iter()
                .map(|r| {
                    vec![
                        r.context.to_string(),
                        or_not_set(&r.name).to_string(),
                        or_not_set(&r.id).to_string(),
                    ]
                })
                .collect();
            print_table(&["Context", "Name", "ID"], rows, output.no_header);
        }
        format => output_structured(&rows, format),
    }
}

/// Forget project, environment and service
pub fn run_context_clear(config: &mut CliConfig) {
    config.context.clear_all();
    eprintln!("Context cleared");
}

/// Dispatch context subcommands
pub async fn run_context_command(
    action: &ContextAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ContextAction::Get => {
            run_context_get(&session.config, &session.output);
            Ok(())
        }
        ContextAction::Clear => {
            run_context_clear(&mut session.config);
            Ok(())
        }
        ContextAction::Set { target } => match target {
            ContextTarget::Project(args) => set_project(session, args).await,
            ContextTarget::Environment(args) => set_environment(session, args).await,
            ContextTarget::Service(args) => set_service(session, args).await,
        },
    }
}

async fn set_project(
    session: &mut Session,
    args: &ContextSetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let info = match (non_empty(&args.id), non_empty(&args.name)) {
        (Some(id), _) => {
            let spinner = create_spinner("Fetching project...", session.quiet());
            let result = session.client.get_project_by_id(id).await;
            finish_spinner(spinner);
            let project = result?;
            BasicInfo::new(project.id, project.name)
        }
        (None, Some(name)) => {
            let owner = session.username().await?;
            let spinner = create_spinner("Fetching project...", session.quiet());
            let result = session.client.get_project_by_owner(&owner, name).await;
            finish_spinner(spinner);
            let project = result?;
            BasicInfo::new(project.id, project.name)
        }
        (None, None) => {
            let (info, _) = session.selector().select_project(Default::default()).await?;
            info
        }
    };

    info!("Switching project context to {} ({})", info.name, info.id);
    eprintln!("Project context is set to <{}>", info.name);
    session.context_mut().set_project(info);
    Ok(())
}

async fn set_environment(
    session: &mut Session,
    args: &ContextSetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = context_project_id(session.context())?;

    let info = match (non_empty(&args.id), non_empty(&args.name)) {
        (Some(id), _) => {
            let env = session.client.get_environment(id).await?;
            if !env.project_id.is_empty() && env.project_id != project_id {
                return Err(CliError::InvalidParam(format!(
                    "environment <{}> does not belong to the current project",
                    id
                ))
                .into());
            }
            BasicInfo::new(env.id, env.name)
        }
        (None, Some(name)) => {
            let environments = session.client.list_environments(&project_id).await?;
            let env = find_unique(environments, name, "environment")?;
            BasicInfo::new(env.id, env.name)
        }
        (None, None) => {
            let (info, _) = session.selector().select_environment(&project_id).await?;
            info
        }
    };

    debug!("Environment context: {:?}", info);
    eprintln!("Environment context is set to <{}>", info.name);
    session.context_mut().set_environment(info);
    Ok(())
}

async fn set_service(
    session: &mut Session,
    args: &ContextSetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = context_project_id(session.context())?;

    let info = match (non_empty(&args.id), non_empty(&args.name)) {
        (Some(id), _) => {
            let service = session.client.get_service(id, "", "", "").await?;
            if service.project_id().is_some_and(|p| p != project_id) {
                return Err(CliError::InvalidParam(format!(
                    "service <{}> does not belong to the current project",
                    id
                ))
                .into());
            }
            BasicInfo::new(service.id, service.name)
        }
        (None, Some(name)) => {
            let services = session.client.list_all_services(&project_id).await?;
            let service = find_unique(services, name, "service")?;
            BasicInfo::new(service.id, service.name)
        }
        (None, None) => {
            let (info, _) = session
                .selector()
                .select_service(SelectServiceOptions::new(&project_id).with_create_new(true))
                .await?;
            info
        }
    };

    debug!("Service context: {:?}", info);
    eprintln!("Service context is set to <{}>", info.name);
    session.context_mut().set_service(info);
    Ok(())
}

/// Environment and service only make sense inside a project
fn context_project_id(ctx: &Context) -> Result<String, CliError> {
    if ctx.project().id.is_empty() {
        return Err(CliError::InvalidParam(
            "please run <zeabur context set project> first".to_string(),
        ));
    }
    Ok(ctx.project().id.clone())
}

/// The single resource named `name`
fn find_unique<T: ZeaburResource>(items: Vec<T>, name: &str, kind: &str) -> Result<T, CliError> {
    let mut matches = items.into_iter().filter(|item| item.name() == name);
    let found = matches
        .next()
        .ok_or_else(|| CliError::NotFound(format!("{} <{}> not found", kind, name)))?;
    if matches.next().is_some() {
        return Err(CliError::Selection(format!(
            "more than one {} named <{}>, use --id instead",
            kind, name
        )));
    }
    Ok(found)
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
