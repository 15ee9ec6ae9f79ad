//! Deployment and log API operations

use serde::Deserialize;
use serde_json::json;

use crate::error::{CliError, Result};
use crate::zeabur::client::normalize_pagination;
use crate::zeabur::traits::Connection;
use crate::zeabur::ZeaburClient;

use super::models::{Deployment, LogEntry};

const DEPLOYMENT_FIELDS: &str = "_id projectID serviceID environmentID gitProvider repoOwner \
     repoName ref commitSHA commitMessage planType status createdAt finishedAt";

#[derive(Deserialize)]
struct DeploymentsData {
    deployments: Connection<Deployment>,
}

#[derive(Deserialize)]
struct DeploymentData {
    deployment: Option<Deployment>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RuntimeLogsData {
    #[serde(default)]
    runtime_logs: Vec<LogEntry>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct BuildLogsData {
    #[serde(default)]
    build_logs: Vec<LogEntry>,
}

impl ZeaburClient {
    /// Most recent deployments of a service, newest first
    pub async fn list_deployments(
        &self,
        service_id: &str,
        environment_id: &str,
        per_page: i64,
    ) -> Result<Vec<Deployment>> {
        let (_, per_page) = normalize_pagination(0, per_page);
        let query = format!(
            "query ListDeployments($serviceID: ObjectID!, $environmentID: ObjectID!, $perPage: Int) {{ \
             deployments(serviceID: $serviceID, environmentID: $environmentID, perPage: $perPage) \
             {{ edges {{ node {{ {} }} }} }} }}",
            DEPLOYMENT_FIELDS
        );
        let data: DeploymentsData = self
            .graphql(
                &query,
                json!({
                    "serviceID": service_id,
                    "environmentID": environment_id,
                    "perPage": per_page,
                }),
                &format!("deployments of service '{}'", service_id),
            )
            .await?;
        Ok(data.deployments.into_nodes())
    }

    pub async fn get_deployment(&self, id: &str) -> Result<Deployment> {
        let query = format!(
            "query GetDeployment($id: ObjectID!) {{ deployment(id: $id) {{ {} }} }}",
            DEPLOYMENT_FIELDS
        );
        let data: DeploymentData = self
            .graphql(&query, json!({ "id": id }), &format!("deployment '{}'", id))
            .await?;
        data.deployment
            .ok_or_else(|| CliError::NotFound(format!("deployment <{}> not found", id)))
    }

    /// Latest deployment, or `None` when the service was never deployed
    pub async fn get_latest_deployment(
        &self,
        service_id: &str,
        environment_id: &str,
    ) -> Result<Option<Deployment>> {
        let mut deployments = self.list_deployments(service_id, environment_id, 1).await?;
        if deployments.is_empty() {
            return Ok(None);
        }
        Ok(Some(deployments.swap_remove(0)))
    }

    pub async fn runtime_logs_by_deployment(&self, deployment_id: &str) -> Result<Vec<LogEntry>> {
        let data: RuntimeLogsData = self
            .graphql(
                "query RuntimeLogs($deploymentID: ObjectID!) { \
                 runtimeLogs(deploymentID: $deploymentID) { timestamp message } }",
                json!({ "deploymentID": deployment_id }),
                &format!("runtime logs of deployment '{}'", deployment_id),
            )
            .await?;
        Ok(data.runtime_logs)
    }

    pub async fn runtime_logs_by_service(
        &self,
        service_id: &str,
        environment_id: &str,
    ) -> Result<Vec<LogEntry>> {
        let data: RuntimeLogsData = self
            .graphql(
                "query RuntimeLogs($serviceID: ObjectID!, $environmentID: ObjectID!) { \
                 runtimeLogs(serviceID: $serviceID, environmentID: $environmentID) \
                 { timestamp message } }",
                json!({ "serviceID": service_id, "environmentID": environment_id }),
                &format!("runtime logs of service '{}'", service_id),
            )
            .await?;
        Ok(data.runtime_logs)
    }

    pub async fn build_logs(&self, deployment_id: &str) -> Result<Vec<LogEntry>> {
        let data: BuildLogsData = self
            .graphql(
                "query BuildLogs($deploymentID: ObjectID!) { \
                 buildLogs(deploymentID: $deploymentID) { timestamp message } }",
                json!({ "deploymentID": deployment_id }),
                &format!("build logs of deployment '{}'", deployment_id),
            )
            .await?;
        Ok(data.build_logs)
    }
}
