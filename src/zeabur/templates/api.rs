//! Template API operations

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::json;

use crate::error::{CliError, Result};
use crate::zeabur::client::normalize_pagination;
use crate::zeabur::traits::Connection;
use crate::zeabur::ZeaburClient;

use super::models::{DeployedProject, Template};

const TEMPLATE_FIELDS: &str = "code name description deploymentCnt previewURL tags createdAt";

fn list_templates_query() -> String {
    format!(
        "query ListTemplates($skip: Int, $limit: Int) {{ templates(skip: $skip, limit: $limit) \
         {{ pageInfo {{ hasNextPage }} edges {{ node {{ {} }} }} }} }}",
        TEMPLATE_FIELDS
    )
}

#[derive(Deserialize)]
struct TemplatesData {
    templates: Connection<Template>,
}

#[derive(Deserialize)]
struct TemplateData {
    template: Option<Template>,
}

#[derive(Deserialize)]
struct CreatedTemplate {
    code: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateTemplateData {
    create_template_from_file: CreatedTemplate,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct DeployTemplateData {
    deploy_template: DeployedProject,
}

impl ZeaburClient {
    pub async fn list_templates(&self, skip: i64, limit: i64) -> Result<Connection<Template>> {
        let (skip, limit) = normalize_pagination(skip, limit);
        let data: TemplatesData = self
            .graphql(
                &list_templates_query(),
                json!({ "skip": skip, "limit": limit }),
                "templates",
            )
            .await?;
        Ok(data.templates)
    }

    pub async fn list_all_templates(&self) -> Result<Vec<Template>> {
        self.fetch_all_connection(&list_templates_query(), json!({}), "templates", "templates")
            .await
    }

    pub async fn get_template(&self, code: &str) -> Result<Template> {
        let query = format!(
            "query GetTemplate($code: String!) {{ template(code: $code) {{ {} }} }}",
            TEMPLATE_FIELDS
        );
        let data: TemplateData = self
            .graphql(&query, json!({ "code": code }), &format!("template '{}'", code))
            .await?;
        data.template
            .ok_or_else(|| CliError::NotFound(format!("template <{}> not found", code)))
    }

    pub async fn delete_template(&self, code: &str) -> Result<()> {
        let _: serde_json::Value = self
            .graphql(
                "mutation DeleteTemplate($code: String!) { deleteTemplate(code: $code) }",
                json!({ "code": code }),
                &format!("deletion of template '{}'", code),
            )
            .await?;
        Ok(())
    }

    /// Publish a template from raw YAML, returning its code
    pub async fn create_template_from_file(&self, raw: &str) -> Result<String> {
        let data: CreateTemplateData = self
            .graphql(
                "mutation CreateTemplate($raw: String!) { createTemplateFromFile(raw: $raw) { code } }",
                json!({ "raw": raw }),
                "template creation",
            )
            .await?;
        Ok(data.create_template_from_file.code)
    }

    pub async fn update_template_from_file(&self, code: &str, raw: &str) -> Result<()> {
        let _: serde_json::Value = self
            .graphql(
                "mutation UpdateTemplate($code: String!, $raw: String!) { \
                 updateTemplateFromFile(code: $code, raw: $raw) }",
                json!({ "code": code, "raw": raw }),
                &format!("update of template '{}'", code),
            )
            .await?;
        Ok(())
    }

    /// Deploy raw template YAML; without a project ID a new project is created
    pub async fn deploy_template(
        &self,
        raw_spec_yaml: &str,
        variables: &BTreeMap<String, String>,
        project_id: Option<&str>,
    ) -> Result<DeployedProject> {
        let data: DeployTemplateData = self
            .graphql(
                "mutation DeployTemplate($rawSpecYaml: String, $variables: Map, $projectID: ObjectID) { \
                 deployTemplate(rawSpecYaml: $rawSpecYaml, variables: $variables, projectID: $projectID) \
                 { _id name } }",
                json!({
                    "rawSpecYaml": raw_spec_yaml,
                    "variables": variables,
                    "projectID": project_id,
                }),
                "template deployment",
            )
            .await?;
        Ok(data.deploy_template)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_partial_json, body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_list_all_templates_pages() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "variables": { "skip": 0, "limit": 100 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "templates": {
                    "pageInfo": { "hasNextPage": true },
                    "edges": [ { "node": { "code": "ABC123", "name": "Blog" } } ]
                } }
            })))
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "variables": { "skip": 1 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "templates": {
                    "pageInfo": { "hasNextPage": false },
                    "edges": [ { "node": { "code": "XYZ789", "name": "Shop" } } ]
                } }
            })))
            .mount(&mock_server)
            .await;

        let templates = client.list_all_templates().await.unwrap();
        let codes: Vec<_> = templates.iter().map(|t| t.code.as_str()).collect();
        assert_eq!(codes, vec!["ABC123", "XYZ789"]);
    }

    #[tokio::test]
    async fn test_create_template_from_file() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_string_contains("createTemplateFromFile"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "createTemplateFromFile": { "code": "NEW001" } }
            })))
            .mount(&mock_server)
            .await;

        let code = client
            .create_template_from_file("kind: Template")
            .await
            .unwrap();
        assert_eq!(code, "NEW001");
    }

    #[tokio::test]
    async fn test_deploy_template_into_project() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({
                "variables": { "projectID": "p-1", "variables": { "DOMAIN": "blog" } }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "deployTemplate": { "_id": "p-1", "name": "blog" } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let mut vars = BTreeMap::new();
        vars.insert("DOMAIN".to_string(), "blog".to_string());
        let project = client
            .deploy_template("kind: Template", &vars, Some("p-1"))
            .await
            .unwrap();
        assert_eq!(project.id, "p-1");
    }

    #[tokio::test]
    async fn test_list_templates_normalizes_page() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(body_partial_json(json!({ "variables": { "skip": 0, "limit": 5 } })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "templates": {
                    "pageInfo": { "hasNextPage": true },
                    "edges": [ { "node": { "code": "AAA111", "name": "Blog" } } ]
                } }
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let page = client.list_templates(-3, 500).await.unwrap();
        assert!(page.page_info.has_next_page);
        assert_eq!(page.edges.len(), 1);
    }
}
