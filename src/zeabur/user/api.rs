//! User API operations

use serde::Deserialize;
use serde_json::json;

use crate::error::Result;
use crate::zeabur::ZeaburClient;

use super::models::User;

#[derive(Deserialize)]
struct MeData {
    me: User,
}

impl ZeaburClient {
    /// The user owning the token
    pub async fn me(&self) -> Result<User> {
        let data: MeData = self
            .graphql(
                "query Me { me { _id name username email language createdAt } }",
                json!({}),
                "current user",
            )
            .await?;
        Ok(data.me)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::CliError;
    use crate::zeabur::ZeaburClient;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_me() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("Authorization", "Bearer test-token"))
            .and(body_string_contains("me {"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "me": {
                    "_id": "u-1", "name": "Ada Lovelace", "username": "ada",
                    "email": "ada@example.com", "language": "en"
                } }
            })))
            .mount(&mock_server)
            .await;

        let user = client.me().await.unwrap();
        assert_eq!(user.username, "ada");
    }

    #[tokio::test]
    async fn test_me_with_bad_token() {
        let mock_server = MockServer::start().await;
        let client = ZeaburClient::test_client(&mock_server.uri());

        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&mock_server)
            .await;

        match client.me().await.unwrap_err() {
            CliError::Api { status, .. } => assert_eq!(status, 401),
            other => panic!("Expected CliError::Api, got {:?}", other),
        }
    }
}
