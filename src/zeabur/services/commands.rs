//! Service command handlers

use std::sync::Arc;

use chrono::{Duration, Utc};
use log::debug;
use serde_json::json;

use crate::cli::{
    MetricType, OutputFormat, ServiceAction, ServiceConfirmArgs, ServiceListArgs,
    ServiceMetricArgs, ServiceTargetArgs,
};
use crate::error::CliError;
use crate::output::common::rfc3339;
use crate::output::{output_list, output_one, output_structured, print_table};
use crate::resolve::ServiceFilter;
use crate::session::Session;
use crate::ui::{confirm_action, create_spinner, finish_spinner};

use super::api::ServiceMutation;
use super::models::{MetricSample, Service};

const PREBUILT_TEMPLATE: &str = "PREBUILT";

/// Dispatch service subcommands
pub async fn run_service_command(
    action: &ServiceAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ServiceAction::List(args) => run_service_list(session, args).await,
        ServiceAction::Get(args) => run_service_get(session, args).await,
        ServiceAction::Restart(args) => {
            run_service_mutation(session, args, ServiceMutation::Restart).await
        }
        ServiceAction::Redeploy(args) => {
            run_service_mutation(session, args, ServiceMutation::Redeploy).await
        }
        ServiceAction::Suspend(args) => {
            run_service_mutation(session, args, ServiceMutation::Suspend).await
        }
        ServiceAction::Delete(args) => run_service_delete(session, args).await,
        ServiceAction::Expose(args) => run_service_expose(session, args).await,
        ServiceAction::Instruction(args) => run_service_instruction(session, args).await,
        ServiceAction::Network(args) => run_service_network(session, args).await,
        ServiceAction::Metric(args) => run_service_metric(session, args).await,
    }
}

/// Plain list, or the detailed one when an environment is known
async fn run_service_list(
    session: &mut Session,
    args: &ServiceListArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let project_id = session.project_id(args.project_id.as_deref()).await?;

    let environment_id = match args.env_id.as_deref().filter(|e| !e.is_empty()) {
        Some(id) => Some(id.to_string()),
        None if session.context().project().id == project_id => {
            Some(session.context().environment().id.clone()).filter(|id| !id.is_empty())
        }
        None => None,
    };

    let spinner = create_spinner("Fetching services...", session.quiet());
    match environment_id {
        Some(environment_id) => {
            debug!("Listing services of {} in environment {}", project_id, environment_id);
            let result = session
                .client
                .list_all_service_details(&project_id, &environment_id)
                .await;
            finish_spinner(spinner);
            output_list(&result?, &session.output);
        }
        None => {
            let result = session.client.list_all_services(&project_id).await;
            finish_spinner(spinner);
            output_list(&result?, &session.output);
        }
    }
    Ok(())
}

async fn run_service_get(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(args).await?;

    let spinner = create_spinner("Fetching service...", session.quiet());
    let result = session
        .client
        .get_service_detail(&target.service_id, "", "", "", &target.environment_id)
        .await;
    finish_spinner(spinner);

    output_one(&result?, &session.output);
    Ok(())
}

async fn run_service_mutation(
    session: &mut Session,
    args: &ServiceConfirmArgs,
    mutation: ServiceMutation,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;

    let message = format!("{} service <{}>?", capitalize(mutation.verb()), target.label());
    if !confirm_action(session.prompter(), args.yes, &message)? {
        eprintln!("Aborted");
        return Ok(());
    }

    let spinner = create_spinner(
        &format!("Running {} on <{}>...", mutation.verb(), target.label()),
        session.quiet(),
    );
    let result = session
        .client
        .mutate_service(mutation, &target.service_id, &target.environment_id)
        .await;
    finish_spinner(spinner);
    result?;

    eprintln!("Service <{}> {} requested", target.label(), mutation.verb());
    Ok(())
}

async fn run_service_delete(
    session: &mut Session,
    args: &ServiceConfirmArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;

    let message = format!("Delete service <{}>?", target.label());
    if !confirm_action(session.prompter(), args.yes, &message)? {
        eprintln!("Aborted");
        return Ok(());
    }

    let spinner = create_spinner("Deleting service...", session.quiet());
    let result = session
        .client
        .delete_service(&target.service_id, &target.environment_id)
        .await;
    finish_spinner(spinner);
    result?;

    if session.context().service().id == target.service_id {
        debug!("Deleted service was the current one, clearing it from context");
        session.context_mut().clear_service();
    }
    eprintln!("Service <{}> deleted", target.label());
    Ok(())
}

async fn run_service_expose(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut target = session.service_target(args).await?;
    if target.service_name.is_empty() {
        target.service_name = session
            .client
            .get_service(&target.service_id, "", "", "")
            .await?
            .name;
    }

    let spinner = create_spinner("Exposing service...", session.quiet());
    let result = session
        .client
        .expose_service(
            &target.service_id,
            &target.environment_id,
            &target.project_id,
            &target.service_name,
        )
        .await;
    finish_spinner(spinner);

    let port = result?;
    eprintln!(
        "Service <{}> port {} is reachable on port {} for {} seconds",
        target.service_name, port.target_port, port.node_port, port.remain_seconds
    );
    output_one(&port, &session.output);
    Ok(())
}

async fn run_service_instruction(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    // Only prebuilt services carry instructions
    let prebuilt: ServiceFilter = Arc::new(|s: &Service| s.template == PREBUILT_TEMPLATE);
    let target = session.service_target_filtered(args, prebuilt).await?;

    let spinner = create_spinner("Fetching instructions...", session.quiet());
    let result = session
        .client
        .service_instructions(&target.service_id, &target.environment_id)
        .await;
    finish_spinner(spinner);

    let instructions = result?;
    if instructions.is_empty() && session.output.format == OutputFormat::Table {
        eprintln!("No instructions for service <{}>", target.label());
        return Ok(());
    }
    output_list(&instructions, &session.output);
    Ok(())
}

async fn run_service_network(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(args).await?;

    let spinner = create_spinner("Fetching network information...", session.quiet());
    let result = session.client.service_dns_name(&target.service_id).await;
    finish_spinner(spinner);

    let dns_name = result?;
    debug!("Private DNS of {}: {}", target.service_id, dns_name);
    match session.output.format {
        OutputFormat::Table => {
            eprintln!("Private DNS name for <{}>:", target.label());
            println!("{}", dns_name);
        }
        format => output_structured(
            &json!({ "serviceID": target.service_id, "dnsName": dns_name }),
            format,
        ),
    }
    Ok(())
}

async fn run_service_metric(
    session: &mut Session,
    args: &ServiceMetricArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    if args.hour <= 0 {
        return Err(CliError::InvalidParam("--hour must be a positive number".to_string()).into());
    }
    let target = session.service_target(&args.target).await?;

    let end = Utc::now();
    let start = end - Duration::hours(args.hour);

    let spinner = create_spinner(&format!("Fetching {} metric...", args.metric), session.quiet());
    let result = session
        .client
        .service_metric(
            &target.service_id,
            &target.project_id,
            &target.environment_id,
            args.metric.api_name(),
            start,
            end,
        )
        .await;
    finish_spinner(spinner);

    let samples = result?;
    match session.output.format {
        OutputFormat::Table => print_table(
            &["Timestamp", "Value"],
            metric_rows(args.metric, &samples),
            session.output.no_header,
        ),
        format => output_structured(&samples, format),
    }
    Ok(())
}

fn metric_rows(metric: MetricType, samples: &[MetricSample]) -> Vec<Vec<String>> {
    samples
        .iter()
        .map(|s| vec![rfc3339(Some(&s.timestamp)), metric.format_value(s.value)])
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BasicInfo;
    use crate::session::Session;
    use crate::ui::testing::{Answer, ScriptedPrompter};
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_with_service(uri: &str, answers: Vec<Answer>) -> Session {
        let mut session = Session::for_test(uri, ScriptedPrompter::new(answers));
        let ctx = session.context_mut();
        ctx.set_project(BasicInfo::new("p-1", "blog"));
        ctx.set_environment(BasicInfo::new("env-1", "production"));
        ctx.set_service(BasicInfo::new("s-1", "web"));
        session
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("restart"), "Restart");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_metric_rows_format_values() {
        let samples = vec![MetricSample {
            timestamp: "2024-05-01T00:00:00Z".parse().unwrap(),
            value: 0.5,
        }];
        let rows = metric_rows(MetricType::Cpu, &samples);
        assert_eq!(rows[0], vec!["2024-05-01T00:00:00Z", "50.000000%"]);
    }

    #[tokio::test]
    async fn test_restart_with_yes_skips_prompt() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("restartService"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "restartService": true } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_with_service(&mock_server.uri(), vec![]);
        let args = ServiceConfirmArgs {
            yes: true,
            ..Default::default()
        };
        run_service_mutation(&mut session, &args, ServiceMutation::Restart)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_delete_current_service_clears_it_from_context() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("deleteService"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "deleteService": true } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_with_service(&mock_server.uri(), vec![Answer::Confirm(true)]);
        run_service_delete(&mut session, &ServiceConfirmArgs::default())
            .await
            .unwrap();

        assert!(session.context().service().is_empty());
        assert_eq!(session.context().project().id, "p-1");
        assert_eq!(session.context().environment().id, "env-1");
    }

    #[tokio::test]
    async fn test_metric_rejects_non_positive_hours() {
        let mock_server = MockServer::start().await;
        let mut session = session_with_service(&mock_server.uri(), vec![]);
        let args = ServiceMetricArgs {
            metric: MetricType::Memory,
            target: ServiceTargetArgs::default(),
            hour: 0,
        };
        assert!(run_service_metric(&mut session, &args).await.is_err());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_instruction_offers_only_prebuilt_services() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("services(projectID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "services": {
                    "edges": [
                        { "node": { "_id": "s-1", "name": "web", "template": "GIT" } },
                        { "node": { "_id": "s-2", "name": "postgres", "template": "PREBUILT" } },
                        { "node": { "_id": "s-3", "name": "redis", "template": "PREBUILT" } }
                    ],
                    "pageInfo": { "hasNextPage": false, "endCursor": "" }
                } }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("instructions("))
            .and(body_partial_json(json!({
                "variables": { "serviceID": "s-3", "environmentID": "env-1" }
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "data": { "instructions": [] } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        // Second of the prebuilt services, not the second service overall
        let mut session = Session::for_test(
            &mock_server.uri(),
            ScriptedPrompter::new(vec![Answer::Select(1)]),
        );
        let ctx = session.context_mut();
        ctx.set_project(BasicInfo::new("p-1", "blog"));
        ctx.set_environment(BasicInfo::new("env-1", "production"));

        run_service_instruction(&mut session, &ServiceTargetArgs::default())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_network_looks_up_context_service() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("dnsName"))
            .and(body_partial_json(json!({ "variables": { "serviceID": "s-1" } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "service": { "dnsName": "web" } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_with_service(&mock_server.uri(), vec![]);
        run_service_network(&mut session, &ServiceTargetArgs::default())
            .await
            .unwrap();
    }
}
