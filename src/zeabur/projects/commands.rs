//! Project command handlers

use futures::future::try_join;
use log::debug;
use serde::Serialize;

use crate::cli::{
    CreateProjectArgs, DeleteProjectArgs, ExportProjectArgs, OutputFormat, ProjectAction,
    ProjectTargetArgs,
};
use crate::error::CliError;
use crate::output::{output_list, output_one, output_structured};
use crate::resolve::SelectProjectOptions;
use crate::session::Session;
use crate::ui::{confirm_action, create_spinner, finish_spinner};
use crate::zeabur::Environment;

use super::models::Project;

/// Project with its environments, as printed by `project get -o json`
#[derive(Serialize)]
struct ProjectWithEnvironments<'a> {
    #[serde(flatten)]
    project: &'a Project,
    environments: &'a [Environment],
}

/// Dispatch project subcommands
pub async fn run_project_command(
    action: &ProjectAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ProjectAction::List => run_project_list(session).await,
        ProjectAction::Get(args) => run_project_get(session, args).await,
        ProjectAction::Create(args) => run_project_create(session, args).await,
        ProjectAction::Delete(args) => run_project_delete(session, args).await,
        ProjectAction::Export(args) => run_project_export(session, args).await,
    }
}

async fn run_project_list(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner("Fetching projects...", session.quiet());
    let result = session.client.list_all_projects().await;
    finish_spinner(spinner);

    let projects = result?;
    debug!("Found {} project(s)", projects.len());
    output_list(&projects, &session.output);
    Ok(())
}

async fn run_project_get(
    session: &mut Session,
    args: &ProjectTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = resolve_project_id(session, args).await?;

    let spinner = create_spinner("Fetching project...", session.quiet());
    let result = try_join(
        session.client.get_project_by_id(&project_id),
        session.client.list_environments(&project_id),
    )
    .await;
    finish_spinner(spinner);

    let (project, environments) = result?;

    match session.output.format {
        OutputFormat::Table => {
            output_one(&project, &session.output);
            println!();
            output_list(&environments, &session.output);
        }
        format => output_structured(
            &ProjectWithEnvironments {
                project: &project,
                environments: &environments,
            },
            format,
        ),
    }
    Ok(())
}

async fn run_project_create(
    session: &mut Session,
    args: &CreateProjectArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let region = match args.region.as_deref().filter(|r| !r.is_empty()) {
        Some(region) => region.to_string(),
        None if session.interactive => session.selector().select_region().await?.id,
        None => {
            return Err(CliError::InvalidParam(
                "--region is required in non-interactive mode".to_string(),
            )
            .into())
        }
    };

    let spinner = create_spinner("Creating project...", session.quiet());
    let result = session
        .client
        .create_project(&region, args.name.as_deref())
        .await;
    finish_spinner(spinner);

    let project = result?;
    eprintln!("Project <{}> created", project.name);
    output_one(&project, &session.output);
    Ok(())
}

async fn run_project_delete(
    session: &mut Session,
    args: &DeleteProjectArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = resolve_project_id(session, &args.target).await?;
    let project = session.client.get_project_by_id(&project_id).await?;

    let message = format!("Delete project <{}>?", project.name);
    if !confirm_action(session.prompter(), args.yes, &message)? {
        eprintln!("Aborted");
        return Ok(());
    }

    let spinner = create_spinner("Deleting project...", session.quiet());
    let result = session.client.delete_project(&project.id).await;
    finish_spinner(spinner);
    result?;

    if session.context().project().id == project.id {
        debug!("Deleted project was the current one, clearing context");
        session.context_mut().clear_project();
    }
    eprintln!("Project <{}> deleted", project.name);
    Ok(())
}

async fn run_project_export(
    session: &mut Session,
    args: &ExportProjectArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = resolve_project_id(session, &args.target).await?;

    let environment_id = match args.env_id.as_deref().filter(|e| !e.is_empty()) {
        Some(id) => id.to_string(),
        None if session.context().project().id == project_id
            && !session.context().environment().id.is_empty() =>
        {
            session.context().environment().id.clone()
        }
        None => session.selector().select_environment(&project_id).await?.0.id,
    };

    let spinner = create_spinner("Exporting project...", session.quiet());
    let result = session
        .client
        .export_project(&project_id, &environment_id)
        .await;
    finish_spinner(spinner);

    let exported = result?;
    for warning in &exported.warnings {
        eprintln!("Warning: {}", warning);
    }
    match session.output.format {
        OutputFormat::Table => println!("{}", exported.resource_yaml.trim_end()),
        format => output_structured(&exported, format),
    }
    Ok(())
}

/// Project ID from `--id`, `--name` (owned by the logged-in user), the
/// context, or a prompt. A prompted project becomes the current one.
async fn resolve_project_id(
    session: &mut Session,
    args: &ProjectTargetArgs,
) -> Result<String, CliError> {
    if let Some(id) = args.id.as_deref().filter(|id| !id.is_empty()) {
        return Ok(id.to_string());
    }

    if let Some(name) = args.name.as_deref().filter(|n| !n.is_empty()) {
        let owner = session.username().await?;
        let project = session.client.get_project_by_owner(&owner, name).await?;
        return Ok(project.id);
    }

    if !session.context().project().id.is_empty() {
        return Ok(session.context().project().id.clone());
    }

    let (info, _) = session
        .selector()
        .select_project(SelectProjectOptions::default())
        .await?;
    let id = info.id.clone();
    session.context_mut().set_project(info);
    Ok(id)
}
