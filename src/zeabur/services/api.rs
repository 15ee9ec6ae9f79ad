//! Service API operations

use chrono::{DateTime, Utc};
use log::debug;
use serde::Deserialize;
use serde_json::json;

use crate::config::api;
use crate::error::{CliError, Result};
use crate::zeabur::client::normalize_pagination;
use crate::zeabur::traits::Connection;
use crate::zeabur::ZeaburClient;

use super::models::{MetricSample, Service, ServiceDetail, ServiceInstruction, TempTcpPort};

const SERVICE_FIELDS: &str = "_id name template createdAt project { _id }";

const SERVICE_DETAIL_FIELDS: &str = "_id name template createdAt project { _id } \
     status(environmentID: $environmentID) \
     consoleURL(environmentID: $environmentID) \
     gitTrigger(environmentID: $environmentID) { branchName provider repoID } \
     domains(environmentID: $environmentID) { _id domain status isGenerated redirectTo }";

fn list_services_query() -> String {
    format!(
        "query ListServices($projectID: ObjectID!, $skip: Int, $limit: Int) {{ \
         services(projectID: $projectID, skip: $skip, limit: $limit) \
         {{ pageInfo {{ hasNextPage }} edges {{ node {{ {} }} }} }} }}",
        SERVICE_FIELDS
    )
}

fn list_service_details_query() -> String {
    format!(
        "query ListServiceDetails($projectID: ObjectID!, $environmentID: ObjectID!, $skip: Int, $limit: Int) {{ \
         services(projectID: $projectID, skip: $skip, limit: $limit) \
         {{ pageInfo {{ hasNextPage }} edges {{ node {{ {} }} }} }} }}",
        SERVICE_DETAIL_FIELDS
    )
}

#[derive(Deserialize)]
struct ServicesData<T> {
    services: Connection<T>,
}

#[derive(Deserialize)]
struct ServiceData<T> {
    service: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DnsName {
    dns_name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateServiceData {
    create_service: Service,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExposeData {
    expose_temp_tcp_port: TempTcpPort,
}

#[derive(Deserialize)]
struct InstructionsData {
    #[serde(default)]
    instructions: Vec<ServiceInstruction>,
}

#[derive(Deserialize)]
struct MetricsData {
    service: Option<ServiceMetrics>,
}

#[derive(Deserialize)]
struct ServiceMetrics {
    #[serde(default)]
    metrics: Vec<MetricSample>,
}

/// Mutations on a service in one environment that return a bool
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceMutation {
    Restart,
    Redeploy,
    Suspend,
}

impl ServiceMutation {
    fn field(&self) -> &'static str {
        match self {
            ServiceMutation::Restart => "restartService",
            ServiceMutation::Redeploy => "redeployService",
            ServiceMutation::Suspend => "suspendService",
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            ServiceMutation::Restart => "restart",
            ServiceMutation::Redeploy => "redeploy",
            ServiceMutation::Suspend => "suspend",
        }
    }
}

impl ZeaburClient {
    /// One page of services in a project
    pub async fn list_services(
        &self,
        project_id: &str,
        skip: i64,
        limit: i64,
    ) -> Result<Connection<Service>> {
        let (skip, limit) = normalize_pagination(skip, limit);
        let data: ServicesData<Service> = self
            .graphql(
                &list_services_query(),
                json!({ "projectID": project_id, "skip": skip, "limit": limit }),
                &format!("services of project '{}'", project_id),
            )
            .await?;
        Ok(data.services)
    }

    /// All services in a project
    pub async fn list_all_services(&self, project_id: &str) -> Result<Vec<Service>> {
        self.fetch_all_connection(
            &list_services_query(),
            json!({ "projectID": project_id }),
            "services",
            &format!("services of project '{}'", project_id),
        )
        .await
    }

    /// All services in a project with their status in one environment
    pub async fn list_all_service_details(
        &self,
        project_id: &str,
        environment_id: &str,
    ) -> Result<Vec<ServiceDetail>> {
        self.fetch_all_connection(
            &list_service_details_query(),
            json!({ "projectID": project_id, "environmentID": environment_id }),
            "services",
            &format!("services of project '{}'", project_id),
        )
        .await
    }

    /// Get a service by ID, or by owner, project name and service name
    pub async fn get_service(
        &self,
        id: &str,
        owner: &str,
        project_name: &str,
        name: &str,
    ) -> Result<Service> {
        let query = format!(
            "query GetService($id: ObjectID, $owner: String, $projectName: String, $name: String) {{ \
             service(_id: $id, owner: $owner, projectName: $projectName, name: $name) {{ {} }} }}",
            SERVICE_FIELDS
        );
        let variables = service_lookup_variables(id, owner, project_name, name)?;
        let data: ServiceData<Service> = self
            .graphql(&query, variables, &format!("service '{}{}'", id, name))
            .await?;
        data.service.ok_or_else(|| not_found(id, name))
    }

    /// Host name of a service on its project's private network
    pub async fn service_dns_name(&self, service_id: &str) -> Result<String> {
        let data: ServiceData<DnsName> = self
            .graphql(
                "query ServiceDNSName($serviceID: ObjectID!) { \
                 service(_id: $serviceID) { dnsName } }",
                json!({ "serviceID": service_id }),
                &format!("DNS name of service '{}'", service_id),
            )
            .await?;
        let service = data.service.ok_or_else(|| not_found(service_id, ""))?;
        Ok(format!("{}.{}", service.dns_name, api::PRIVATE_DNS_SUFFIX))
    }

    /// Get a service with its state in one environment
    pub async fn get_service_detail(
        &self,
        id: &str,
        owner: &str,
        project_name: &str,
        name: &str,
        environment_id: &str,
    ) -> Result<ServiceDetail> {
        let query = format!(
            "query GetServiceDetail($id: ObjectID, $owner: String, $projectName: String, $name: String, \
             $environmentID: ObjectID!) {{ \
             service(_id: $id, owner: $owner, projectName: $projectName, name: $name) {{ {} }} }}",
            SERVICE_DETAIL_FIELDS
        );
        let mut variables = service_lookup_variables(id, owner, project_name, name)?;
        variables["environmentID"] = json!(environment_id);
        let data: ServiceData<ServiceDetail> = self
            .graphql(&query, variables, &format!("service '{}{}'", id, name))
            .await?;
        data.service.ok_or_else(|| not_found(id, name))
    }

    /// Restart, redeploy or suspend a service
    pub async fn mutate_service(
        &self,
        mutation: ServiceMutation,
        service_id: &str,
        environment_id: &str,
    ) -> Result<()> {
        let query = format!(
            "mutation ServiceAction($serviceID: ObjectID!, $environmentID: ObjectID!) {{ \
             {}(serviceID: $serviceID, environmentID: $environmentID) }}",
            mutation.field()
        );
        debug!("Running {} on service {}", mutation.field(), service_id);
        let _: serde_json::Value = self
            .graphql(
                &query,
                json!({ "serviceID": service_id, "environmentID": environment_id }),
                &format!("{} of service '{}'", mutation.verb(), service_id),
            )
            .await?;
        Ok(())
    }

    pub async fn delete_service(&self, service_id: &str, environment_id: &str) -> Result<()> {
        let _: serde_json::Value = self
            .graphql(
                "mutation DeleteService($id: ObjectID!, $environmentID: ObjectID) { \
                 deleteService(_id: $id, environmentID: $environmentID) }",
                json!({ "id": service_id, "environmentID": environment_id }),
                &format!("deletion of service '{}'", service_id),
            )
            .await?;
        Ok(())
    }

    /// Create a service with no source attached yet
    pub async fn create_empty_service(&self, project_id: &str, name: &str) -> Result<Service> {
        let query = format!(
            "mutation CreateService($projectID: ObjectID!, $name: String!) {{ \
             createService(projectID: $projectID, template: GIT, name: $name) {{ {} }} }}",
            SERVICE_FIELDS
        );
        let data: CreateServiceData = self
            .graphql(
                &query,
                json!({ "projectID": project_id, "name": name }),
                &format!("creation of service '{}'", name),
            )
            .await?;
        Ok(data.create_service)
    }

    pub async fn expose_service(
        &self,
        service_id: &str,
        environment_id: &str,
        project_id: &str,
        service_name: &str,
    ) -> Result<TempTcpPort> {
        let data: ExposeData = self
            .graphql(
                "mutation ExposeService($serviceID: ObjectID!, $environmentID: ObjectID!, \
                 $projectID: ObjectID!, $name: String!) { \
                 exposeTempTcpPort(serviceID: $serviceID, environmentID: $environmentID, \
                 projectID: $projectID, serviceName: $name) \
                 { serviceID environmentID targetPort nodePort remainSeconds } }",
                json!({
                    "serviceID": service_id,
                    "environmentID": environment_id,
                    "projectID": project_id,
                    "name": service_name,
                }),
                &format!("temporary port of service '{}'", service_id),
            )
            .await?;
        Ok(data.expose_temp_tcp_port)
    }

    pub async fn service_instructions(
        &self,
        service_id: &str,
        environment_id: &str,
    ) -> Result<Vec<ServiceInstruction>> {
        let data: InstructionsData = self
            .graphql(
                "query Instructions($serviceID: ObjectID!, $environmentID: ObjectID!) { \
                 instructions(serviceID: $serviceID, environmentID: $environmentID) \
                 { category content title type } }",
                json!({ "serviceID": service_id, "environmentID": environment_id }),
                &format!("instructions of service '{}'", service_id),
            )
            .await?;
        Ok(data.instructions)
    }

    /// Metric samples of a service between two instants
    pub async fn service_metric(
        &self,
        service_id: &str,
        project_id: &str,
        environment_id: &str,
        metric_type: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<MetricSample>> {
        let data: MetricsData = self
            .graphql(
                "query ServiceMetric($serviceID: ObjectID!, $projectID: ObjectID!, \
                 $environmentID: ObjectID!, $metricType: MetricType!, $startTime: Time!, \
                 $endTime: Time!) { service(_id: $serviceID) { \
                 metrics(environmentID: $environmentID, metricType: $metricType, \
                 startTime: $startTime, endTime: $endTime, projectID: $projectID) \
                 { timestamp value } } }",
                json!({
                    "serviceID": service_id,
                    "projectID": project_id,
                    "environmentID": environment_id,
                    "metricType": metric_type,
                    "startTime": start.to_rfc3339(),
                    "endTime": end.to_rfc3339(),
                }),
                &format!("{} metric of service '{}'", metric_type, service_id),
            )
            .await?;
        data.service
            .map(|s| s.metrics)
            .ok_or_else(|| not_found(service_id, ""))
    }
}

fn service_lookup_variables(
    id: &str,
    owner: &str,
    project_name: &str,
    name: &str,
) -> Result<serde_json::Value> {
    if !id.is_empty() {
        return Ok(json!({ "id": id }));
    }
    if owner.is_empty() || project_name.is_empty() || name.is_empty() {
        return Err(CliError::InvalidParam(
            "either service ID or owner, project name and service name must be specified"
                .to_string(),
        ));
    }
    Ok(json!({ "owner": owner, "projectName": project_name, "name": name }))
}

fn not_found(id: &str, name: &str) -> CliError {
    let label = if id.is_empty() { name } else { id };
    CliError::NotFound(format!("service <{}> not found", label))
}
