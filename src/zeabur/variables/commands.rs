//! Variable command handlers
//!
//! The API only replaces a service's whole variable set, so every change
//! reads the current set, edits it locally and writes it back.

use std::collections::BTreeMap;
use std::path::Path;

use log::debug;

use crate::cli::{
    ServiceTargetArgs, VariableAction, VariableDeleteArgs, VariableEnvArgs, VariableSetArgs,
};
use crate::error::CliError;
use crate::output::output_list;
use crate::resolve::ServiceTarget;
use crate::session::Session;
use crate::ui::{confirm_action, create_spinner, finish_spinner};

use super::models::Variable;

/// Dispatch variable subcommands
pub async fn run_variable_command(
    action: &VariableAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        VariableAction::List(args) => run_variable_list(session, args).await,
        VariableAction::Create(args) => run_variable_create(session, args).await,
        VariableAction::Update(args) => run_variable_update(session, args).await,
        VariableAction::Delete(args) => run_variable_delete(session, args).await,
        VariableAction::Env(args) => run_variable_env(session, args).await,
    }
}

async fn run_variable_list(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(args).await?;
    let variables = fetch_variables(session, &target).await?;
    output_list(&variables, &session.output);
    Ok(())
}

async fn run_variable_create(
    session: &mut Session,
    args: &VariableSetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;
    let current = to_map(fetch_variables(session, &target).await?);

    let merged = with_new_keys(current, &args.keys)?;
    save_variables(session, &target, &merged).await?;
    eprintln!("{} variable(s) created on <{}>", args.keys.len(), target.label());
    Ok(())
}

async fn run_variable_update(
    session: &mut Session,
    args: &VariableSetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;
    let current = to_map(fetch_variables(session, &target).await?);

    let merged = with_updated_keys(current, &args.keys)?;
    save_variables(session, &target, &merged).await?;
    eprintln!("{} variable(s) updated on <{}>", args.keys.len(), target.label());
    Ok(())
}

async fn run_variable_delete(
    session: &mut Session,
    args: &VariableDeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;
    let current = to_map(fetch_variables(session, &target).await?);

    let remaining = without_keys(current, &args.delete_keys)?;

    let message = format!(
        "Delete variable(s) {} from <{}>?",
        args.delete_keys.join(", "),
        target.label()
    );
    if !confirm_action(session.prompter(), args.yes, &message)? {
        eprintln!("Aborted");
        return Ok(());
    }

    save_variables(session, &target, &remaining).await?;
    eprintln!("{} variable(s) deleted from <{}>", args.delete_keys.len(), target.label());
    Ok(())
}

/// Replace the whole set with a .env file; nothing is merged
async fn run_variable_env(
    session: &mut Session,
    args: &VariableEnvArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let variables = read_env_file(&args.file)?;
    let target = session.service_target(&args.target).await?;

    save_variables(session, &target, &variables).await?;
    eprintln!(
        "Variables of <{}> replaced from {}, restart the service to apply them",
        target.label(),
        args.file.display()
    );

    let rows: Vec<Variable> = variables
        .into_iter()
        .map(|(key, value)| Variable {
            key,
            value,
            service_id: target.service_id.clone(),
        })
        .collect();
    output_list(&rows, &session.output);
    Ok(())
}

async fn fetch_variables(
    session: &Session,
    target: &ServiceTarget,
) -> Result<Vec<Variable>, CliError> {
    let spinner = create_spinner("Fetching variables...", session.quiet());
    let result = session
        .client
        .list_variables(&target.service_id, &target.environment_id)
        .await;
    finish_spinner(spinner);
    result
}

async fn save_variables(
    session: &Session,
    target: &ServiceTarget,
    variables: &BTreeMap<String, String>,
) -> Result<(), CliError> {
    debug!("Writing {} variable(s) to {}", variables.len(), target.service_id);
    let spinner = create_spinner("Saving variables...", session.quiet());
    let result = session
        .client
        .update_variables(&target.service_id, &target.environment_id, variables)
        .await;
    finish_spinner(spinner);
    result
}

/// Parse a .env file into a variable set
fn read_env_file(path: &Path) -> Result<BTreeMap<String, String>, CliError> {
    if !path.exists() {
        return Err(CliError::InvalidParam(format!(
            "file not found: {}",
            path.display()
        )));
    }
    let entries = dotenvy::from_path_iter(path).map_err(|e| {
        CliError::InvalidParam(format!("failed to read {}: {}", path.display(), e))
    })?;
    entries
        .map(|entry| {
            entry.map_err(|e| {
                CliError::InvalidParam(format!("failed to parse {}: {}", path.display(), e))
            })
        })
        .collect()
}

fn to_map(variables: Vec<Variable>) -> BTreeMap<String, String> {
    variables.into_iter().map(|v| (v.key, v.value)).collect()
}

/// Add keys that must not exist yet
fn with_new_keys(
    mut current: BTreeMap<String, String>,
    pairs: &[(String, String)],
) -> Result<BTreeMap<String, String>, CliError> {
    for (key, value) in pairs {
        if current.contains_key(key) {
            return Err(CliError::InvalidParam(format!(
                "variable <{}> already exists, use `zeabur variable update` instead",
                key
            )));
        }
        current.insert(key.clone(), value.clone());
    }
    Ok(current)
}

/// Change keys that must exist already
fn with_updated_keys(
    mut current: BTreeMap<String, String>,
    pairs: &[(String, String)],
) -> Result<BTreeMap<String, String>, CliError> {
    for (key, value) in pairs {
        match current.get_mut(key) {
            Some(slot) => *slot = value.clone(),
            None => {
                return Err(CliError::NotFound(format!(
                    "variable <{}> does not exist, use `zeabur variable create` instead",
                    key
                )))
            }
        }
    }
    Ok(current)
}

/// Remove keys that must exist
fn without_keys(
    mut current: BTreeMap<String, String>,
    keys: &[String],
) -> Result<BTreeMap<String, String>, CliError> {
    for key in keys {
        if current.remove(key.trim()).is_none() {
            return Err(CliError::NotFound(format!("variable <{}> does not exist", key.trim())));
        }
    }
    Ok(current)
}
