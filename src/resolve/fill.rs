//! Filling missing identifiers
//!
//! Every method takes the identifiers a command has so far and fills only
//! the empty ones. The returned flag tells whether anything was filled.

use std::sync::Arc;

use log::debug;

use crate::context::Context;
use crate::error::{CliError, Result};

use super::selector::{SelectProjectOptions, SelectServiceOptions, Selector, ServiceFilter};

pub struct ParamFiller<'a> {
    selector: Selector<'a>,
    service_filter: Option<ServiceFilter>,
}

impl<'a> ParamFiller<'a> {
    pub fn new(selector: Selector<'a>) -> Self {
        Self {
            selector,
            service_filter: None,
        }
    }

    /// Offer only matching services when a service has to be picked
    pub fn with_service_filter(mut self, filter: ServiceFilter) -> Self {
        self.service_filter = Some(filter);
        self
    }

    fn service_options(&self, project_id: &str) -> SelectServiceOptions {
        let opts = SelectServiceOptions::new(project_id);
        match &self.service_filter {
            Some(filter) => opts.with_filter(Arc::clone(filter)),
            None => opts,
        }
    }

    pub fn selector(&self) -> &Selector<'a> {
        &self.selector
    }

    /// Fill the project ID
    pub async fn project(&self, project_id: &mut String) -> Result<bool> {
        if !project_id.is_empty() {
            return Ok(false);
        }

        let (info, _) = self
            .selector
            .select_project(SelectProjectOptions::default())
            .await?;
        *project_id = info.id;
        Ok(true)
    }

    /// Fill project ID and name, unless either one is already known
    pub async fn project_by_name(&self, project_id: &mut String, name: &mut String) -> Result<bool> {
        if !project_id.is_empty() || !name.is_empty() {
            return Ok(false);
        }

        let (info, _) = self
            .selector
            .select_project(SelectProjectOptions::default())
            .await?;
        *project_id = info.id;
        *name = info.name;
        Ok(true)
    }

    /// Fill the environment ID, resolving the project first if needed
    pub async fn environment(
        &self,
        project_id: &mut String,
        environment_id: &mut String,
    ) -> Result<bool> {
        if !environment_id.is_empty() {
            return Ok(false);
        }

        self.project(project_id).await?;
        let (info, _) = self.selector.select_environment(project_id).await?;
        *environment_id = info.id;
        Ok(true)
    }

    /// Fill the service ID, resolving the project first if needed
    pub async fn service(&self, project_id: &mut String, service_id: &mut String) -> Result<bool> {
        if !service_id.is_empty() {
            return Ok(false);
        }

        self.project(project_id).await?;
        let (info, _) = self
            .selector
            .select_service(self.service_options(project_id))
            .await?;
        *service_id = info.id;
        Ok(true)
    }

    /// Fill the service ID from its name, or select a service when no name
    /// is given either.
    ///
    /// A missing project context is selected first and written into `ctx`,
    /// so later steps of the same command see it.
    pub async fn service_by_name(
        &self,
        ctx: &mut Context,
        service_id: &mut String,
        service_name: &mut String,
    ) -> Result<bool> {
        if !service_id.is_empty() {
            return Ok(false);
        }

        if ctx.project().id.is_empty() {
            let (info, _) = self
                .selector
                .select_project(SelectProjectOptions::default())
                .await?;
            debug!("Project context set to {} ({})", info.name, info.id);
            ctx.set_project(info);
        }
        let project = ctx.project().clone();

        if service_name.is_empty() {
            let (info, _) = self
                .selector
                .select_service(self.service_options(&project.id))
                .await?;
            *service_id = info.id;
            *service_name = info.name;
            return Ok(true);
        }

        let services = self.selector.client().list_all_services(&project.id).await?;
        let mut matches = services.into_iter().filter(|s| s.name == *service_name);

        match (matches.next(), matches.next()) {
            (Some(service), None) => {
                *service_id = service.id;
                Ok(true)
            }
            (None, _) => Err(CliError::NotFound(format!(
                "service <{}> not found in project <{}>",
                service_name,
                if project.name.is_empty() { &project.id } else { &project.name }
            ))),
            (Some(_), Some(_)) => Err(CliError::Selection(format!(
                "more than one service named <{}>, use --id instead",
                service_name
            ))),
        }
    }

    /// [`Self::service`] followed by [`Self::environment`]
    pub async fn service_with_environment(
        &self,
        project_id: &mut String,
        service_id: &mut String,
        environment_id: &mut String,
    ) -> Result<bool> {
        let service_changed = self.service(project_id, service_id).await?;
        let environment_changed = self.environment(project_id, environment_id).await?;
        Ok(service_changed || environment_changed)
    }

    /// [`Self::service_by_name`] followed by [`Self::environment`].
    ///
    /// The environment is looked up in the context project, or in the
    /// service's own project when the context has none.
    pub async fn service_by_name_with_environment(
        &self,
        ctx: &mut Context,
        service_id: &mut String,
        service_name: &mut String,
        environment_id: &mut String,
    ) -> Result<bool> {
        let service_changed = self.service_by_name(ctx, service_id, service_name).await?;
        if !environment_id.is_empty() {
            return Ok(service_changed);
        }

        let mut project_id = ctx.project().id.clone();
        if project_id.is_empty() {
            let service = self
                .selector
                .client()
                .get_service(service_id, "", "", "")
                .await?;
            project_id = service.project_id().unwrap_or_default().to_string();
            if service_name.is_empty() {
                *service_name = service.name;
            }
        }

        let environment_changed = self.environment(&mut project_id, environment_id).await?;
        Ok(service_changed || environment_changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::BasicInfo;
    use crate::resolve::test_support::{mount_environments, mount_projects, mount_services};
    use crate::ui::testing::{Answer, ScriptedPrompter};
    use crate::zeabur::{Service, ZeaburClient};
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn context_with_project(id: &str, name: &str) -> Context {
        let mut ctx = Context::default();
        ctx.set_project(BasicInfo::new(id, name));
        ctx
    }

    #[tokio::test]
    async fn test_project_noop_when_set() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut project_id = "p-1".to_string();
        let changed = filler.project(&mut project_id).await.unwrap();

        assert!(!changed);
        assert_eq!(project_id, "p-1");
        assert!(prompter.asked().is_empty());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_project_filled_from_selection() {
        let mock_server = MockServer::start().await;
        mount_projects(&mock_server, &[("p-1", "blog")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut project_id = String::new();
        assert!(filler.project(&mut project_id).await.unwrap());
        assert_eq!(project_id, "p-1");
    }

    #[tokio::test]
    async fn test_project_by_name_noop_when_name_given() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut id = String::new();
        let mut name = "blog".to_string();
        assert!(!filler.project_by_name(&mut id, &mut name).await.unwrap());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_environment_resolves_project_first() {
        let mock_server = MockServer::start().await;
        mount_projects(&mock_server, &[("p-1", "blog")]).await;
        mount_environments(&mock_server, &[("env-1", "production")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut project_id = String::new();
        let mut env_id = String::new();
        assert!(filler.environment(&mut project_id, &mut env_id).await.unwrap());
        assert_eq!(project_id, "p-1");
        assert_eq!(env_id, "env-1");
    }

    #[tokio::test]
    async fn test_service_with_environment_fills_all_three() {
        let mock_server = MockServer::start().await;
        mount_projects(&mock_server, &[("p-1", "blog")]).await;
        mount_services(&mock_server, &[("s-1", "web")]).await;
        mount_environments(&mock_server, &[("env-1", "production")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut project_id = String::new();
        let mut service_id = String::new();
        let mut env_id = String::new();
        let changed = filler
            .service_with_environment(&mut project_id, &mut service_id, &mut env_id)
            .await
            .unwrap();

        assert!(changed);
        assert_eq!(
            (project_id.as_str(), service_id.as_str(), env_id.as_str()),
            ("p-1", "s-1", "env-1")
        );
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_service_by_name_noop_when_id_set() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = Context::default();
        let mut id = "s-1".to_string();
        let mut name = String::new();
        assert!(!filler.service_by_name(&mut ctx, &mut id, &mut name).await.unwrap());
        assert!(mock_server.received_requests().await.unwrap().is_empty());
        assert!(ctx.project().is_empty());
    }

    #[tokio::test]
    async fn test_service_by_name_resolves_unique_match() {
        let mock_server = MockServer::start().await;
        mount_services(&mock_server, &[("s-1", "web"), ("s-2", "db")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = context_with_project("p-1", "blog");
        let mut id = String::new();
        let mut name = "db".to_string();
        assert!(filler.service_by_name(&mut ctx, &mut id, &mut name).await.unwrap());
        assert_eq!(id, "s-2");
        assert!(prompter.asked().is_empty());
    }

    #[tokio::test]
    async fn test_service_by_name_zero_matches_fails() {
        let mock_server = MockServer::start().await;
        mount_services(&mock_server, &[("s-1", "web")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = context_with_project("p-1", "blog");
        let mut id = String::new();
        let mut name = "api".to_string();
        let err = filler
            .service_by_name(&mut ctx, &mut id, &mut name)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("service <api> not found in project <blog>"));
        assert!(id.is_empty());
    }

    #[tokio::test]
    async fn test_service_by_name_duplicate_names_fail() {
        let mock_server = MockServer::start().await;
        mount_services(&mock_server, &[("s-1", "web"), ("s-2", "web")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = context_with_project("p-1", "blog");
        let mut id = String::new();
        let mut name = "web".to_string();
        assert!(filler
            .service_by_name(&mut ctx, &mut id, &mut name)
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_one_project_two_services_prompts_for_service_only() {
        let mock_server = MockServer::start().await;
        mount_projects(&mock_server, &[("p-1", "blog")]).await;
        mount_services(&mock_server, &[("s-1", "web"), ("s-2", "db")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![Answer::Select(0)]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = Context::default();
        let mut id = String::new();
        let mut name = String::new();
        assert!(filler.service_by_name(&mut ctx, &mut id, &mut name).await.unwrap());

        assert_eq!(prompter.messages(), vec!["Select a service"]);
        assert_eq!(id, "s-1");
        assert_eq!(name, "web");
        // the auto-selected project is written back into the context
        assert_eq!(ctx.project(), &BasicInfo::new("p-1", "blog"));
    }

    #[tokio::test]
    async fn test_service_by_name_with_environment_combines_flags() {
        let mock_server = MockServer::start().await;
        mount_services(&mock_server, &[("s-1", "web")]).await;
        mount_environments(&mock_server, &[("env-1", "production")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = context_with_project("p-1", "blog");
        let mut id = String::new();
        let mut name = String::new();
        let mut env_id = String::new();
        let changed = filler
            .service_by_name_with_environment(&mut ctx, &mut id, &mut name, &mut env_id)
            .await
            .unwrap();
        assert!(changed);
        assert_eq!((id.as_str(), env_id.as_str()), ("s-1", "env-1"));

        // nothing left to fill
        let changed = filler
            .service_by_name_with_environment(&mut ctx, &mut id, &mut name, &mut env_id)
            .await
            .unwrap();
        assert!(!changed);
    }

    #[tokio::test]
    async fn test_environment_uses_service_project_without_context() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("service(_id: $id"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "service": { "_id": "s-1", "name": "web", "project": { "_id": "p-7" } } }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(wiremock::matchers::body_partial_json(
                json!({ "variables": { "projectID": "p-7" } }),
            ))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "environments": [ { "_id": "env-7", "name": "production" } ] }
            })))
            .mount(&mock_server)
            .await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter));

        let mut ctx = Context::default();
        let mut id = "s-1".to_string();
        let mut name = String::new();
        let mut env_id = String::new();
        filler
            .service_by_name_with_environment(&mut ctx, &mut id, &mut name, &mut env_id)
            .await
            .unwrap();
        assert_eq!(env_id, "env-7");
        assert_eq!(name, "web");
    }

    #[tokio::test]
    async fn test_service_filter_limits_selection() {
        let mock_server = MockServer::start().await;
        mount_services(&mock_server, &[("s-1", "web"), ("s-2", "db"), ("s-3", "cache")]).await;
        mount_environments(&mock_server, &[("env-1", "production")]).await;
        let client = ZeaburClient::test_client(&mock_server.uri());
        let prompter = ScriptedPrompter::new(vec![Answer::Select(1)]);
        let filler = ParamFiller::new(Selector::new(&client, &prompter))
            .with_service_filter(Arc::new(|s: &Service| s.name != "web"));

        let mut ctx = context_with_project("p-1", "blog");
        let mut id = String::new();
        let mut name = String::new();
        let mut env_id = String::new();
        filler
            .service_by_name_with_environment(&mut ctx, &mut id, &mut name, &mut env_id)
            .await
            .unwrap();

        assert_eq!(id, "s-3");
        assert_eq!(prompter.asked()[0].items, vec!["db", "cache"]);
    }
}
