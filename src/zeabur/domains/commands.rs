//! Domain command handlers

use log::debug;

use crate::cli::{DomainAction, DomainCreateArgs, DomainDeleteArgs, ServiceTargetArgs};
use crate::error::CliError;
use crate::output::output_list;
use crate::resolve::ServiceTarget;
use crate::session::Session;
use crate::ui::{confirm_action, create_spinner, finish_spinner};

/// Dispatch domain subcommands
pub async fn run_domain_command(
    action: &DomainAction,
    session: &mut Session,
) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        DomainAction::List(args) => run_domain_list(session, args).await,
        DomainAction::Create(args) => run_domain_create(session, args).await,
        DomainAction::Delete(args) => run_domain_delete(session, args).await,
    }
}

async fn run_domain_list(
    session: &mut Session,
    args: &ServiceTargetArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(args).await?;

    let spinner = create_spinner("Fetching domains...", session.quiet());
    let result = session
        .client
        .list_domains(&target.service_id, &target.environment_id)
        .await;
    finish_spinner(spinner);

    output_list(&result?, &session.output);
    Ok(())
}

async fn run_domain_create(
    session: &mut Session,
    args: &DomainCreateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;

    let domain = match args.domain.as_deref().filter(|d| !d.is_empty()) {
        Some(domain) => domain.to_string(),
        None => {
            let message = if args.generated {
                "Subdomain prefix"
            } else {
                "Domain name"
            };
            let input = session.prompter().input(message, "")?;
            if input.trim().is_empty() {
                return Err(CliError::InvalidParam("domain cannot be empty".to_string()).into());
            }
            input.trim().to_string()
        }
    };

    let region = project_region(session, &target).await?;
    let availability = session
        .client
        .check_domain_available(&domain, args.generated, &region)
        .await?;
    if !availability.is_available {
        let reason = availability.reason.unwrap_or_else(|| "already taken".to_string());
        return Err(CliError::InvalidParam(format!(
            "domain <{}> is not available: {}",
            domain, reason
        ))
        .into());
    }

    let spinner = create_spinner("Creating domain...", session.quiet());
    let result = session
        .client
        .add_domain(
            &target.service_id,
            &target.environment_id,
            args.generated,
            &domain,
            args.redirect.as_deref().filter(|r| !r.is_empty()),
        )
        .await;
    finish_spinner(spinner);

    let created = result?;
    eprintln!("Domain <{}> created", created);
    println!("{}", created);
    Ok(())
}

async fn run_domain_delete(
    session: &mut Session,
    args: &DomainDeleteArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let target = session.service_target(&args.target).await?;

    let domain = match args.domain.as_deref().filter(|d| !d.is_empty()) {
        Some(domain) => domain.to_string(),
        None => select_domain(session, &target).await?,
    };

    let message = format!("Delete domain <{}>?", domain);
    if !confirm_action(session.prompter(), args.yes, &message)? {
        eprintln!("Aborted");
        return Ok(());
    }

    let spinner = create_spinner("Deleting domain...", session.quiet());
    let result = session.client.remove_domain(&domain).await;
    finish_spinner(spinner);

    if !result? {
        return Err(CliError::Api {
            status: 200,
            message: format!("domain <{}> was not removed", domain),
        }
        .into());
    }
    eprintln!("Domain <{}> deleted", domain);
    Ok(())
}

/// Ask which of the service's domains to act on
async fn select_domain(session: &Session, target: &ServiceTarget) -> Result<String, CliError> {
    let domains = session
        .client
        .list_domains(&target.service_id, &target.environment_id)
        .await?;
    if domains.is_empty() {
        return Err(CliError::NotFound(format!(
            "service <{}> has no domains",
            target.label()
        )));
    }

    let items: Vec<String> = domains.into_iter().map(|d| d.domain).collect();
    let index = session.prompter().select("Select a domain", 0, &items)?;
    items
        .into_iter()
        .nth(index)
        .ok_or_else(|| CliError::Selection("invalid domain selection".to_string()))
}

/// Region ID of the target's project; empty when the project has none
async fn project_region(session: &Session, target: &ServiceTarget) -> Result<String, CliError> {
    if target.project_id.is_empty() {
        return Ok(String::new());
    }
    let project = session.client.get_project_by_id(&target.project_id).await?;
    let region = project.region.map(|r| r.id).unwrap_or_default();
    debug!("Project {} runs in region '{}'", project.id, region);
    Ok(region)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BasicInfo;
    use crate::ui::testing::{Answer, ScriptedPrompter};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn session_with_service(uri: &str, answers: Vec<Answer>) -> Session {
        let mut session = Session::for_test(uri, ScriptedPrompter::new(answers));
        let ctx = session.context_mut();
        ctx.set_project(BasicInfo::new("p-1", "blog"));
        ctx.set_environment(BasicInfo::new("env-1", "production"));
        ctx.set_service(BasicInfo::new("s-1", "web"));
        session
    }

    async fn mount_project_region(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("project(_id: $id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "project": { "_id": "p-1", "name": "blog", "region": { "id": "hnd1" } } }
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_create_unavailable_domain_fails_before_adding() {
        let mock_server = MockServer::start().await;
        mount_project_region(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("checkDomainAvailable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "checkDomainAvailable": { "isAvailable": false, "reason": "taken" } }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("addDomain"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let mut session = session_with_service(&mock_server.uri(), vec![]);
        let args = DomainCreateArgs {
            domain: Some("blog.example.com".to_string()),
            ..Default::default()
        };
        let err = run_domain_create(&mut session, &args).await.unwrap_err();
        assert!(err.to_string().contains("domain <blog.example.com> is not available: taken"));
    }

    #[tokio::test]
    async fn test_create_prompts_for_missing_domain() {
        let mock_server = MockServer::start().await;
        mount_project_region(&mock_server).await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("checkDomainAvailable"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "checkDomainAvailable": { "isAvailable": true } }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("addDomain"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "addDomain": { "domain": "blog.zeabur.app" } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_with_service(
            &mock_server.uri(),
            vec![Answer::Input("blog".to_string())],
        );
        let args = DomainCreateArgs {
            generated: true,
            ..Default::default()
        };
        run_domain_create(&mut session, &args).await.unwrap();
    }

    #[tokio::test]
    async fn test_delete_selects_from_service_domains() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("domains(environmentID"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "service": { "domains": [
                    { "_id": "d-1", "domain": "a.zeabur.app" },
                    { "_id": "d-2", "domain": "b.example.com" }
                ] } }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(wiremock::matchers::body_partial_json(
                json!({ "variables": { "domain": "b.example.com" } }),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "data": { "removeDomain": true } })),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut session = session_with_service(
            &mock_server.uri(),
            vec![Answer::Select(1), Answer::Confirm(true)],
        );
        run_domain_delete(&mut session, &DomainDeleteArgs::default())
            .await
            .unwrap();
    }
}
