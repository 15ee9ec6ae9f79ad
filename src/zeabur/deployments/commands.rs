//! Deployment command handlers

use std::time::Duration;

use log::{debug, info};

use crate::cli::{
    DeploymentAction, DeploymentGetArgs, DeploymentLogArgs, LogType, ServiceTargetArgs,
};
use crate::config::{api, defaults};
use crate::error::CliError;
use crate::output::{output_list, output_one};
use crate::session::Session;
use crate::ui::{create_spinner, finish_spinner};

use super::models::Deployment;
use super::watch::{fetch_logs, spawn_log_watch, LogSource};

/// Dispatch deployment subcommands
pub async fn run_deployment_command(
    action: &DeploymentAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DeploymentAction::List(args) => run_deployment_list(session, args).await,
        DeploymentAction::Get(args) => run_deployment_get(session, args).await,
        DeploymentAction::Log(args) => run_deployment_log(session, args).await,
    }
}

async fn run_deployment_list(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(args).await?;

    let spinner = create_spinner("Fetching deployments...", session.quiet());
    let result = session
        .client
        .list_deployments(&target.service_id, &target.environment_id, api::MAX_PAGE_SIZE)
        .await;
    finish_spinner(spinner);

    output_list(&result?, &session.output);
    Ok(())
}

async fn run_deployment_get(
    session: &mut Session,
    args: &DeploymentGetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let deployment = match args.deployment_id.as_deref().filter(|id| !id.is_empty()) {
        Some(id) => {
            let spinner = create_spinner("Fetching deployment...", session.quiet());
            let result = session.client.get_deployment(id).await;
            finish_spinner(spinner);
            result?
        }
        None => latest_deployment(session, &args.target).await?,
    };

    output_one(&deployment, &session.output);
    Ok(())
}

async fn run_deployment_log(
    session: &mut Session,
    args: &DeploymentLogArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let source = log_source(session, args).await?;
    debug!("Reading logs from {:?}", source);

    if args.watch {
        return watch_logs(session, source).await;
    }

    let spinner = create_spinner(&format!("Fetching {} logs...", args.log_type), session.quiet());
    let result = fetch_logs(&session.client, &source).await;
    finish_spinner(spinner);

    output_list(&result?, &session.output);
    Ok(())
}

/// Pick the log stream from the flags. Runtime logs without a deployment
/// follow the service itself; build logs need a deployment, so they fall
/// back to the latest one.
async fn log_source(
    session: &mut Session,
    args: &DeploymentLogArgs,
) -> Result<LogSource, CliError> {
    let explicit = args.deployment_id.as_deref().filter(|id| !id.is_empty());

    let source = match (args.log_type, explicit) {
        (LogType::Runtime, Some(id)) => LogSource::RuntimeDeployment {
            deployment_id: id.to_string(),
        },
        (LogType::Build, Some(id)) => LogSource::Build {
            deployment_id: id.to_string(),
        },
        (LogType::Runtime, None) => {
            let target = session.service_target(&args.target).await?;
            LogSource::RuntimeService {
                service_id: target.service_id,
                environment_id: target.environment_id,
            }
        }
        (LogType::Build, None) => LogSource::Build {
            deployment_id: latest_deployment(session, &args.target).await?.id,
        },
    };
    Ok(source)
}

/// Print log lines as they arrive until the stream ends or Ctrl+C
async fn watch_logs(
    session: &Session,
    source: LogSource,
) -> Result<(), Box<dyn std::error::Error>> {
    let interval = Duration::from_secs(defaults::LOG_POLL_INTERVAL_SECS);
    let (mut rx, handle) = spawn_log_watch(session.client.clone(), source, interval);
    info!("Watching logs, polling every {:?}", interval);

    loop {
        tokio::select! {
            entry = rx.recv() => match entry {
                Some(Ok(entry)) => println!("{}", entry.line()),
                Some(Err(e)) => return Err(e.into()),
                None => break,
            },
            _ = tokio::signal::ctrl_c() => {
                debug!("Interrupted, stopping log watch");
                handle.abort();
                break;
            }
        }
    }
    Ok(())
}

async fn latest_deployment(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<Deployment, CliError> {
    let target = session.service_target(args).await?;

    let spinner = create_spinner("Fetching latest deployment...", session.quiet());
    let result = session
        .client
        .get_latest_deployment(&target.service_id, &target.environment_id)
        .await;
    finish_spinner(spinner);

    result?.ok_or_else(|| {
        CliError::NotFound(format!("no deployment found for service <{}>", target.label()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BasicInfo;
    use crate::ui::testing::ScriptedPrompter;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn log_args(log_type: LogType, deployment_id: Option<&str>) -> DeploymentLogArgs {
        DeploymentLogArgs {
            target: ServiceTargetArgs::default(),
            deployment_id: deployment_id.map(str::to_string),
            log_type,
            watch: false,
        }
    }

    fn session_with_service(uri: &str) -> Session {
        let mut session = Session::for_test(uri, ScriptedPrompter::new(vec![]));
        let ctx = session.context_mut();
        ctx.set_project(BasicInfo::new("p-1", "blog"));
        ctx.set_environment(BasicInfo::new("env-1", "production"));
        ctx.set_service(BasicInfo::new("s-1", "web"));
        session
    }

    #[tokio::test]
    async fn test_log_source_with_deployment_id_needs_no_lookup() {
        let mock_server = MockServer::start().await;
        let mut session = Session::for_test(&mock_server.uri(), ScriptedPrompter::new(vec![]));

        let source = log_source(&mut session, &log_args(LogType::Build, Some("d-1")))
            .await
            .unwrap();
        assert_eq!(
            source,
            LogSource::Build {
                deployment_id: "d-1".to_string()
            }
        );
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_runtime_logs_follow_service_from_context() {
        let mock_server = MockServer::start().await;
        let mut session = session_with_service(&mock_server.uri());

        let source = log_source(&mut session, &log_args(LogType::Runtime, None))
            .await
            .unwrap();
        assert_eq!(
            source,
            LogSource::RuntimeService {
                service_id: "s-1".to_string(),
                environment_id: "env-1".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_build_logs_use_latest_deployment() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("deployments(serviceID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "deployments": {
                    "edges": [ { "node": { "_id": "d-9", "status": "BUILDING" } } ]
                } }
            })))
            .mount(&mock_server)
            .await;
        let mut session = session_with_service(&mock_server.uri());

        let source = log_source(&mut session, &log_args(LogType::Build, None))
            .await
            .unwrap();
        assert_eq!(
            source,
            LogSource::Build {
                deployment_id: "d-9".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_latest_deployment_missing_is_an_error() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("deployments(serviceID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "deployments": { "edges": [] } }
            })))
            .mount(&mock_server)
            .await;
        let mut session = session_with_service(&mock_server.uri());

        let err = latest_deployment(&mut session, &ServiceTargetArgs::default())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "no deployment found for service <web>");
    }
}
