//! Variable API operations

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::json;

use crate::error::{CliError, Result};
use crate::zeabur::ZeaburClient;

use super::models::Variable;

#[derive(Deserialize)]
struct VariablesData {
    service: Option<ServiceVariables>,
}

#[derive(Deserialize)]
struct ServiceVariables {
    #[serde(default)]
    variables: Vec<Variable>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct UpdateVariablesData {
    update_environment_variable: bool,
}

impl ZeaburClient {
    /// Variables the user set on a service (exposed ones only)
    pub async fn list_variables(
        &self,
        service_id: &str,
        environment_id: &str,
    ) -> Result<Vec<Variable>> {
        let data: VariablesData = self
            .graphql(
                "query ListVariables($serviceID: ObjectID!, $environmentID: ObjectID!) { \
                 service(_id: $serviceID) { variables(environmentID: $environmentID, exposed: true) \
                 { key value serviceID } } }",
                json!({ "serviceID": service_id, "environmentID": environment_id }),
                &format!("variables of service '{}'", service_id),
            )
            .await?;
        data.service
            .map(|s| s.variables)
            .ok_or_else(|| CliError::NotFound(format!("service <{}> not found", service_id)))
    }

    /// Replace the whole variable set of a service
    pub async fn update_variables(
        &self,
        service_id: &str,
        environment_id: &str,
        data: &BTreeMap<String, String>,
    ) -> Result<()> {
        let result: UpdateVariablesData = self
            .graphql(
                "mutation UpdateVariables($environmentID: ObjectID!, $serviceID: ObjectID!, $data: Map!) { \
                 updateEnvironmentVariable(environmentID: $environmentID, serviceID: $serviceID, data: $data) }",
                json!({
                    "environmentID": environment_id,
                    "serviceID": service_id,
                    "data": data,
                }),
                &format!("variables of service '{}'", service_id),
            )
            .await?;
        if !result.update_environment_variable {
            return Err(CliError::Api {
                status: 200,
                message: format!("variables of service <{}> were not updated", service_id),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_variables() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "service": { "variables": [
                    { "key": "PORT", "value": "8080", "serviceID": "s-1" }
                ] } }
            })))
            .mount(&mock_server)
            .await;

        let vars = client.list_variables("s-1", "env-1").await.unwrap();
        assert_eq!(vars[0].key, "PORT");
    }

    #[tokio::test]
    async fn test_update_variables_sends_map() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "data": { "PORT": "3000", "NODE_ENV": "production" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "updateEnvironmentVariable": true }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut data = BTreeMap::new();
        data.insert("PORT".to_string(), "3000".to_string());
        data.insert("NODE_ENV".to_string(), "production".to_string());
        client.update_variables("s-1", "env-1", &data).await.unwrap();
    }

    #[tokio::test]
    async fn test_update_variables_false_is_error() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "updateEnvironmentVariable": false }
            })))
            .mount(&mock_server)
            .await;

        let result = client
            .update_variables("s-1", "env-1", &BTreeMap::new())
            .await;
        assert!(result.is_err());
    }
}
