//! Template command handlers

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::cli::{
    OutputFormat, TemplateAction, TemplateCodeArgs, TemplateCreateArgs, TemplateDeleteArgs,
    TemplateDeployArgs, TemplateSearchArgs, TemplateUpdateArgs,
};
use crate::error::CliError;
use crate::output::{output_list, output_one, output_structured, print_table};
use crate::resolve::SelectProjectOptions;
use crate::session::Session;
use crate::ui::{confirm_action, create_spinner, finish_spinner};

use super::models::Template;

/// Dispatch template subcommands
pub async fn run_template_command(
    action: &TemplateAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        TemplateAction::List => run_template_list(session).await,
        TemplateAction::Search(args) => run_template_search(session, args).await,
        TemplateAction::Get(args) => run_template_get(session, args).await,
        TemplateAction::Delete(args) => run_template_delete(session, args).await,
        TemplateAction::Create(args) => run_template_create(session, args).await,
        TemplateAction::Update(args) => run_template_update(session, args).await,
        TemplateAction::Deploy(args) => run_template_deploy(session, args).await,
    }
}

async fn run_template_list(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner("Fetching templates...", session.quiet());
    let result = session.client.list_all_templates().await;
    finish_spinner(spinner);

    output_list(&result?, &session.output);
    Ok(())
}

async fn run_template_search(
    session: &mut Session,
    args: &TemplateSearchArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let keyword = match args.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(keyword) => keyword.to_string(),
        None if session.interactive => session.prompter().input("Search keyword", "")?,
        None => return Err(CliError::InvalidParam("keyword is required".to_string()).into()),
    };

    let spinner = create_spinner("Searching templates...", session.quiet());
    let result = session.client.list_all_templates().await;
    finish_spinner(spinner);

    let matched = search_templates(result?, &keyword);
    debug!("{} template(s) match '{}'", matched.len(), keyword);
    match session.output.format {
        OutputFormat::Table if matched.is_empty() => eprintln!("No templates found"),
        OutputFormat::Table => {
            let rows = matched
                .iter()
                .map(|t| {
                    vec![
                        t.code.clone(),
                        t.name.clone(),
                        t.description.clone(),
                        t.deployment_cnt.to_string(),
                    ]
                })
                .collect();
            print_table(
                &["Code", "Name", "Description", "Deployments"],
                rows,
                session.output.no_header,
            );
        }
        format => output_structured(&matched, format),
    }
    Ok(())
}

async fn run_template_get(
    session: &mut Session,
    args: &TemplateCodeArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let code = template_code(session, args).await?;

    let spinner = create_spinner("Fetching template...", session.quiet());
    let result = session.client.get_template(&code).await;
    finish_spinner(spinner);

    output_one(&result?, &session.output);
    Ok(())
}

async fn run_template_delete(
    session: &mut Session,
    args: &TemplateDeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let code = template_code(session, &args.code).await?;

    let message = format!("Delete template <{}>?", code);
    if !confirm_action(session.prompter(), args.yes, &message)? {
        eprintln!("Aborted");
        return Ok(());
    }

    let spinner = create_spinner("Deleting template...", session.quiet());
    let result = session.client.delete_template(&code).await;
    finish_spinner(spinner);
    result?;

    eprintln!("Template <{}> deleted", code);
    Ok(())
}

async fn run_template_create(
    session: &mut Session,
    args: &TemplateCreateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_template_file(&args.file)?;

    let spinner = create_spinner("Creating template...", session.quiet());
    let result = session.client.create_template_from_file(&raw).await;
    finish_spinner(spinner);

    let code = result?;
    eprintln!("Template <{}> created", code);
    println!("{}", code);
    Ok(())
}

async fn run_template_update(
    session: &mut Session,
    args: &TemplateUpdateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_template_file(&args.file)?;

    let spinner = create_spinner("Updating template...", session.quiet());
    let result = session
        .client
        .update_template_from_file(&args.code, &raw)
        .await;
    finish_spinner(spinner);
    result?;

    eprintln!("Template <{}> updated", args.code);
    Ok(())
}

async fn run_template_deploy(
    session: &mut Session,
    args: &TemplateDeployArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let raw = read_template_file(&args.file)?;
    let variables: BTreeMap<String, String> = args.vars.iter().cloned().collect();

    let project_id = match args.project_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => id.to_string(),
        None if !session.context().project().id.is_empty() => {
            session.context().project().id.clone()
        }
        None => {
            let (info, _) = session
                .selector()
                .select_project(SelectProjectOptions {
                    create_preferred: true,
                })
                .await?;
            info.id
        }
    };
    debug!(
        "Deploying template with {} variable(s) into project {}",
        variables.len(),
        project_id
    );

    let spinner = create_spinner("Deploying template...", session.quiet());
    let result = session
        .client
        .deploy_template(&raw, &variables, Some(&project_id))
        .await;
    finish_spinner(spinner);

    let project = result?;
    eprintln!("Template deployed into project <{}> ({})", project.name, project.id);
    Ok(())
}

/// Template code from `--code`, or picked from the user's templates
async fn template_code(session: &Session, args: &TemplateCodeArgs) -> Result<String, CliError> {
    if let Some(code) = args.code.as_deref().filter(|c| !c.is_empty()) {
        return Ok(code.to_string());
    }

    let templates = session.client.list_all_templates().await?;
    if templates.is_empty() {
        return Err(CliError::NotFound("no templates found".to_string()));
    }

    let items: Vec<String> = templates
        .iter()
        .map(|t| format!("{} ({})", t.name, t.code))
        .collect();
    let index = session.prompter().select("Select a template", 0, &items)?;
    templates
        .into_iter()
        .nth(index)
        .map(|t| t.code)
        .ok_or_else(|| CliError::Selection("invalid template selection".to_string()))
}

/// Templates whose name or description contains `keyword`, most
/// deployed first
fn search_templates(templates: Vec<Template>, keyword: &str) -> Vec<Template> {
    let keyword = keyword.to_lowercase();
    let mut matched: Vec<Template> = templates
        .into_iter()
        .filter(|t| {
            t.name.to_lowercase().contains(&keyword)
                || t.description.to_lowercase().contains(&keyword)
        })
        .collect();
    matched.sort_by(|a, b| b.deployment_cnt.cmp(&a.deployment_cnt));
    matched
}

/// Read a template file, rejecting anything that is not YAML
fn read_template_file(path: &Path) -> Result<String, CliError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CliError::InvalidParam(format!("failed to read {}: {}", path.display(), e))
    })?;
    serde_yml::from_str::<serde_yml::Value>(&raw).map_err(|e| {
        CliError::InvalidParam(format!("{} is not valid YAML: {}", path.display(), e))
    })?;
    Ok(raw)
}
