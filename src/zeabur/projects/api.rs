//! Project API operations

use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::error::{CliError, Result};
use crate::zeabur::client::normalize_pagination;
use crate::zeabur::traits::Connection;
use crate::zeabur::ZeaburClient;

use super::models::{ExportedTemplate, Project, Region};

const PROJECT_FIELDS: &str = "_id name description createdAt region { id name description }";

fn list_projects_query() -> String {
    format!(
        "query ListProjects($skip: Int, $limit: Int) {{ projects(skip: $skip, limit: $limit) \
         {{ pageInfo {{ hasNextPage }} edges {{ node {{ {} }} }} }} }}",
        PROJECT_FIELDS
    )
}

#[derive(Deserialize)]
struct ProjectsData {
    projects: Connection<Project>,
}

#[derive(Deserialize)]
struct ProjectData {
    project: Option<Project>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateProjectData {
    create_project: Project,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeleteProjectData {
    delete_project: bool,
}

#[derive(Deserialize)]
struct RegionsData {
    regions: Vec<Region>,
}

#[derive(Deserialize)]
struct ExportData {
    project: ExportProject,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExportProject {
    exported_template: ExportedTemplate,
}

impl ZeaburClient {
    /// One page of the user's projects
    pub async fn list_projects(&self, skip: i64, limit: i64) -> Result<Connection<Project>> {
        let (skip, limit) = normalize_pagination(skip, limit);
        let query = list_projects_query();
        let data: ProjectsData = self
            .graphql(&query, json!({ "skip": skip, "limit": limit }), "projects")
            .await?;
        Ok(data.projects)
    }

    /// All projects of the user, walking every page
    pub async fn list_all_projects(&self) -> Result<Vec<Project>> {
        let query = list_projects_query();
        self.fetch_all_connection(&query, json!({}), "projects", "projects")
            .await
    }

    /// Get a project by ID, or by owner and name when no ID is given
    pub async fn get_project(&self, id: &str, owner: &str, name: &str) -> Result<Project> {
        if !id.is_empty() {
            return self.get_project_by_id(id).await;
        }
        if owner.is_empty() || name.is_empty() {
            return Err(CliError::InvalidParam(
                "either project ID or owner and name must be specified".to_string(),
            ));
        }
        self.get_project_by_owner(owner, name).await
    }

    pub async fn get_project_by_id(&self, id: &str) -> Result<Project> {
        let query = format!(
            "query GetProject($id: ObjectID!) {{ project(_id: $id) {{ {} }} }}",
            PROJECT_FIELDS
        );
        let data: ProjectData = self
            .graphql(&query, json!({ "id": id }), &format!("project '{}'", id))
            .await?;
        data.project
            .ok_or_else(|| CliError::NotFound(format!("project <{}> not found", id)))
    }

    pub async fn get_project_by_owner(&self, owner: &str, name: &str) -> Result<Project> {
        debug!("Looking up project {}/{}", owner, name);
        let query = format!(
            "query GetProject($owner: String!, $name: String!) {{ project(owner: $owner, name: $name) {{ {} }} }}",
            PROJECT_FIELDS
        );
        let data: ProjectData = self
            .graphql(
                &query,
                json!({ "owner": owner, "name": name }),
                &format!("project '{}/{}'", owner, name),
            )
            .await?;
        data.project
            .ok_or_else(|| CliError::NotFound(format!("project <{}> not found", name)))
    }

    /// Create a project; the server picks a name when none is given
    pub async fn create_project(&self, region: &str, name: Option<&str>) -> Result<Project> {
        let query = format!(
            "mutation CreateProject($region: String!, $name: String) {{ createProject(region: $region, name: $name) {{ {} }} }}",
            PROJECT_FIELDS
        );
        let data: CreateProjectData = self
            .graphql(
                &query,
                json!({ "region": region, "name": name }),
                "project creation",
            )
            .await?;
        Ok(data.create_project)
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        let data: DeleteProjectData = self
            .graphql(
                "mutation DeleteProject($id: ObjectID!) { deleteProject(_id: $id) }",
                json!({ "id": id }),
                &format!("deletion of project '{}'", id),
            )
            .await?;
        if !data.delete_project {
            return Err(CliError::Api {
                status: 200,
                message: format!("project <{}> was not deleted", id),
            });
        }
        Ok(())
    }

    pub async fn get_regions(&self) -> Result<Vec<Region>> {
        let data: RegionsData = self
            .graphql(
                "query Regions { regions { id name description available provider } }",
                json!({}),
                "regions",
            )
            .await?;
        Ok(data.regions)
    }

    /// Export one environment of a project as template YAML
    pub async fn export_project(
        &self,
        project_id: &str,
        environment_id: &str,
    ) -> Result<ExportedTemplate> {
        let data: ExportData = self
            .graphql(
                "query ExportProject($id: ObjectID!, $environmentID: ObjectID!) { project(_id: $id) \
                 { exportedTemplate(environmentID: $environmentID) { resourceYAML warnings } } }",
                json!({ "id": project_id, "environmentID": environment_id }),
                &format!("export of project '{}'", project_id),
            )
            .await?;
        Ok(data.project.exported_template)
    }
}
