//! Environment API operations

use serde::Deserialize;
use serde_json::json;

use crate::error::{CliError, Result};
use crate::zeabur::ZeaburClient;

use super::models::Environment;

const ENVIRONMENT_FIELDS: &str = "_id name projectID createdAt";

#[derive(Deserialize)]
struct EnvironmentsData {
    environments: Vec<Environment>,
}

#[derive(Deserialize)]
struct EnvironmentData {
    environment: Option<Environment>,
}

impl ZeaburClient {
    /// Environments of a project
    pub async fn list_environments(&self, project_id: &str) -> Result<Vec<Environment>> {
        let query = format!(
            "query ListEnvironments($projectID: ObjectID!) {{ environments(projectID: $projectID) {{ {} }} }}",
            ENVIRONMENT_FIELDS
        );
        let data: EnvironmentsData = self
            .graphql(
                &query,
                json!({ "projectID": project_id }),
                &format!("environments of project '{}'", project_id),
            )
            .await?;
        Ok(data.environments)
    }

    pub async fn get_environment(&self, id: &str) -> Result<Environment> {
        let query = format!(
            "query GetEnvironment($id: ObjectID!) {{ environment(_id: $id) {{ {} }} }}",
            ENVIRONMENT_FIELDS
        );
        let data: EnvironmentData = self
            .graphql(&query, json!({ "id": id }), &format!("environment '{}'", id))
            .await?;
        data.environment
            .ok_or_else(|| CliError::NotFound(format!("environment <{}> not found", id)))
    }
}
