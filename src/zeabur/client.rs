//! Zeabur GraphQL client

use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;

use crate::config::api;
use crate::error::{CliError, Result};
use crate::zeabur::traits::Connection;

/// Raw GraphQL response envelope
#[derive(Deserialize, Debug)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Deserialize, Debug)]
struct GraphQlError {
    message: String,
}

/// Clamp pagination arguments into the range the API accepts
pub fn normalize_pagination(skip: i64, limit: i64) -> (i64, i64) {
    let skip = skip.max(0);
    let limit = if limit <= 0 || limit > api::MAX_PAGE_SIZE {
        api::DEFAULT_PAGE_SIZE
    } else {
        limit
    };
    (skip, limit)
}

/// Zeabur API client
#[derive(Clone)]
pub struct ZeaburClient {
    client: Client,
    token: String,
    endpoint: String,
}

impl ZeaburClient {
    /// Create a new client for the given server base URL
    pub fn new(token: String, server_url: &str) -> Self {
        let client = Client::builder()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .tcp_keepalive(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            token,
            endpoint: format!("{}{}", server_url.trim_end_matches('/'), api::GRAPHQL_PATH),
        }
    }

    /// Resolve the server URL from the environment, falling back to the default
    pub fn server_url_from_env() -> String {
        std::env::var(api::SERVER_URL_ENV_VAR)
            .ok()
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| api::DEFAULT_SERVER_URL.to_string())
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn with_headers(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Content-Type", "application/json")
    }

    /// Run a query or mutation and decode its `data` object
    pub async fn graphql<T>(&self, query: &str, variables: Value, error_context: &str) -> Result<T>
    where
        T: DeserializeOwned,
    {
        debug!("GraphQL request for {} to {}", error_context, self.endpoint);

        let body = json!({ "query": query, "variables": variables });
        let response = self
            .with_headers(self.client.post(&self.endpoint))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CliError::Api {
                status: response.status().as_u16(),
                message: format!("Failed to fetch {}", error_context),
            });
        }

        let envelope: GraphQlResponse<T> = response.json().await?;

        if !envelope.errors.is_empty() {
            let messages = envelope.errors.into_iter().map(|e| e.message).collect();
            return Err(CliError::GraphQl(messages));
        }

        envelope.data.ok_or_else(|| CliError::Api {
            status: 200,
            message: format!("Empty response for {}", error_context),
        })
    }

    /// Walk a paginated connection field until `hasNextPage` is false.
    ///
    /// `variables` must be a JSON object; `skip` and `limit` are filled in
    /// per page.
    pub async fn fetch_all_connection<T>(
        &self,
        query: &str,
        mut variables: Value,
        field: &str,
        error_context: &str,
    ) -> Result<Vec<T>>
    where
        T: DeserializeOwned,
    {
        let mut items = Vec::new();
        let mut skip = 0;

        loop {
            variables["skip"] = json!(skip);
            variables["limit"] = json!(api::MAX_PAGE_SIZE);

            let mut data: Value = self
                .graphql(query, variables.clone(), error_context)
                .await?;
            let page: Connection<T> = serde_json::from_value(data[field].take())?;

            let received = page.edges.len() as i64;
            let has_next = page.page_info.has_next_page;
            items.extend(page.into_nodes());

            debug!(
                "Fetched {} {} (skip {}), has next page: {}",
                received, error_context, skip, has_next
            );

            if !has_next || received == 0 {
                break;
            }
            skip += received;
        }

        Ok(items)
    }
}

#[cfg(test)]
impl ZeaburClient {
    /// Create a test client pointing at a mock server
    pub fn test_client(base_url: &str) -> Self {
        Self::new("test-token".to_string(), base_url)
    }
}
