//! Interactive selection of projects, services and environments
//!
//! Each `select_*` lists the candidates under a parent scope and:
//! - fails when there are none,
//! - returns the only candidate without asking,
//! - otherwise asks the user to pick one.

use std::sync::Arc;

use log::{debug, info};

use crate::context::BasicInfo;
use crate::error::{CliError, Result};
use crate::ui::Prompter;
use crate::zeabur::helpers::random_name;
use crate::zeabur::{Environment, Project, Region, Service, ZeaburClient};

const CREATE_PROJECT: &str = "Create a new project";
const CREATE_SERVICE: &str = "Create a new service";

/// Options for [`Selector::select_project`]
#[derive(Debug, Clone, Copy, Default)]
pub struct SelectProjectOptions {
    /// Always offer "Create a new project", even for a single candidate
    pub create_preferred: bool,
}

/// Predicate narrowing the service candidates
pub type ServiceFilter = Arc<dyn Fn(&Service) -> bool + Send + Sync>;

/// Options for [`Selector::select_service`]
pub struct SelectServiceOptions {
    pub project_id: String,
    /// Return a single candidate without prompting
    pub auto: bool,
    /// Offer "Create a new service" in the prompt
    pub create_new: bool,
    pub filter: Option<ServiceFilter>,
}

impl SelectServiceOptions {
    pub fn new(project_id: impl Into<String>) -> Self {
        Self {
            project_id: project_id.into(),
            auto: true,
            create_new: false,
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: ServiceFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn with_create_new(mut self, create_new: bool) -> Self {
        self.create_new = create_new;
        self
    }
}

/// Lists candidates through the API and asks through a [`Prompter`]
pub struct Selector<'a> {
    client: &'a ZeaburClient,
    prompter: &'a dyn Prompter,
}

impl<'a> Selector<'a> {
    pub fn new(client: &'a ZeaburClient, prompter: &'a dyn Prompter) -> Self {
        Self { client, prompter }
    }

    pub fn client(&self) -> &'a ZeaburClient {
        self.client
    }

    pub fn prompter(&self) -> &'a dyn Prompter {
        self.prompter
    }

    /// Pick one of the user's projects, or create one
    pub async fn select_project(&self, opts: SelectProjectOptions) -> Result<(BasicInfo, Project)> {
        let projects = self
            .client
            .list_all_projects()
            .await
            .map_err(|e| step_failed("list projects", e))?;
        debug!("Found {} project(s)", projects.len());

        if projects.is_empty() && !opts.create_preferred {
            return Err(CliError::Selection("no projects found".to_string()));
        }

        if projects.len() == 1 && !opts.create_preferred {
            let project = projects.into_iter().next().ok_or_else(no_projects)?;
            info!("Only one project found, select <{}> automatically", project.name);
            eprintln!(
                "Only one project found, select <{}> automatically",
                project.name
            );
            return Ok((BasicInfo::new(&project.id, &project.name), project));
        }

        let mut items: Vec<String> = projects.iter().map(|p| p.name.clone()).collect();
        items.push(CREATE_PROJECT.to_string());

        let default = if opts.create_preferred { items.len() - 1 } else { 0 };
        let index = self.prompter.select("Select project", default, &items)?;
        if index < projects.len() {
            let project = projects.into_iter().nth(index).ok_or_else(no_projects)?;
            return Ok((BasicInfo::new(&project.id, &project.name), project));
        }

        let project = self.create_project().await?;
        Ok((BasicInfo::new(&project.id, &project.name), project))
    }

    /// Ask for a region to create a project in
    pub async fn select_region(&self) -> Result<Region> {
        let regions = self
            .client
            .get_regions()
            .await
            .map_err(|e| step_failed("get regions", e))?;
        // The first entry is the platform's shared default and is not offered
        let mut choices: Vec<_> = regions.into_iter().skip(1).collect();
        if choices.is_empty() {
            return Err(CliError::Selection("no regions available".to_string()));
        }

        let items: Vec<String> = choices.iter().map(|r| r.label()).collect();
        let index = self.prompter.select("Select project region", 0, &items)?;
        if index >= choices.len() {
            return Err(CliError::Selection("invalid region selection".to_string()));
        }
        Ok(choices.swap_remove(index))
    }

    /// Ask for a region and create a project there
    pub async fn create_project(&self) -> Result<Project> {
        let region = self.select_region().await?;
        debug!("Creating project in region {}", region.id);
        let project = self
            .client
            .create_project(&region.id, None)
            .await
            .map_err(|e| step_failed("create project", e))?;
        eprintln!("Project <{}> created", project.name);
        Ok(project)
    }

    /// Pick a service of a project
    pub async fn select_service(&self, opts: SelectServiceOptions) -> Result<(BasicInfo, Service)> {
        let mut services = self
            .client
            .list_all_services(&opts.project_id)
            .await
            .map_err(|e| step_failed("list services", e))?;
        if let Some(filter) = &opts.filter {
            services.retain(|s| filter(s));
        }
        debug!(
            "Found {} service(s) in project {}",
            services.len(),
            opts.project_id
        );

        if services.is_empty() {
            return Err(CliError::Selection("no services found".to_string()));
        }

        if services.len() == 1 && opts.auto {
            let service = services.into_iter().next().ok_or_else(no_services)?;
            info!(
                "Only one service in current project, select <{}> automatically",
                service.name
            );
            eprintln!(
                "Only one service in current project, select <{}> automatically",
                service.name
            );
            return Ok((BasicInfo::new(&service.id, &service.name), service));
        }

        let mut items: Vec<String> = services.iter().map(|s| s.name.clone()).collect();
        if opts.create_new {
            items.push(CREATE_SERVICE.to_string());
        }

        let index = self.prompter.select("Select a service", 0, &items)?;
        if index < services.len() {
            let service = services.into_iter().nth(index).ok_or_else(no_services)?;
            return Ok((BasicInfo::new(&service.id, &service.name), service));
        }

        let name = self.prompter.input("Service name", &random_name(8))?;
        let service = self
            .client
            .create_empty_service(&opts.project_id, &name)
            .await?;
        eprintln!("Service <{}> created", service.name);
        Ok((BasicInfo::new(&service.id, &service.name), service))
    }

    /// Pick an environment of a project
    pub async fn select_environment(&self, project_id: &str) -> Result<(BasicInfo, Environment)> {
        let environments = self
            .client
            .list_environments(project_id)
            .await
            .map_err(|e| step_failed("list environments", e))?;

        if environments.is_empty() {
            return Err(CliError::Selection(
                "there are no environments in current project".to_string(),
            ));
        }

        if environments.len() == 1 {
            let env = environments.into_iter().next().ok_or_else(no_environments)?;
            info!(
                "Only one environment in current project, select <{}> automatically",
                env.name
            );
            return Ok((BasicInfo::new(&env.id, &env.name), env));
        }

        let items: Vec<String> = environments.iter().map(|e| e.name.clone()).collect();
        let index = self.prompter.select("Select an environment", 0, &items)?;
        let env = environments
            .into_iter()
            .nth(index)
            .ok_or_else(no_environments)?;
        Ok((BasicInfo::new(&env.id, &env.name), env))
    }
}

/// Prefix a remote failure with the selection step it broke
fn step_failed(step: &str, err: CliError) -> CliError {
    CliError::Selection(format!("{} failed: {}", step, err))
}

fn no_projects() -> CliError {
    CliError::Selection("no projects found".to_string())
}

fn no_services() -> CliError {
    CliError::Selection("no services found".to_string())
}

fn no_environments() -> CliError {
    CliError::Selection("there are no environments in current project".to_string())
}
