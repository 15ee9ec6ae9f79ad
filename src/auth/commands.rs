//! Auth command handlers

use std::time::Duration;

use log::{debug, info, warn};

use crate::config::auth;
use crate::context::CliConfig;
use crate::error::CliError;
use crate::output::output_one;
use crate::session::Session;
use crate::ui::{create_spinner, finish_spinner};
use crate::zeabur::helpers::nonce;
use crate::zeabur::{User, ZeaburClient};

use super::callback::CallbackServer;

/// Log in and store the token plus the user's identity in `config`.
///
/// A token from `--token` or `ZEABUR_TOKEN` is verified and stored as is.
/// Otherwise, in interactive mode, the browser confirm flow runs.
pub async fn run_login(
    config: &mut CliConfig,
    cli_token: Option<&str>,
    server_url: &str,
    interactive: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let env_token = std::env::var(auth::TOKEN_ENV_VAR).ok();
    let given = [cli_token, env_token.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|t| !t.is_empty())
        .map(str::to_string);

    if given.is_none() {
        if let Some(user) = current_user(config, server_url).await {
            eprintln!(
                "Already logged in as {}, run `zeabur auth logout` first to switch accounts",
                user.name
            );
            return Ok(());
        }
    }

    let token = match given {
        Some(token) => token,
        None if interactive => browser_login().await?,
        None => {
            return Err(CliError::TokenNotFound(format!(
                "please set {} or use --token to log in non-interactively",
                auth::TOKEN_ENV_VAR
            ))
            .into())
        }
    };

    let user = ZeaburClient::new(token.clone(), server_url).me().await?;
    config.token = Some(token);
    config.user = Some(user.name.clone());
    config.username = Some(user.username.clone());

    info!("Logged in as {} ({})", user.username, user.email);
    eprintln!("Logged in as {} ({})", user.name, user.email);
    Ok(())
}

/// Forget the stored token and user
pub fn run_logout(config: &mut CliConfig) {
    if config.token.is_none() {
        eprintln!("Not logged in");
        return;
    }
    config.clear_credentials();
    eprintln!("Logged out");
}

/// Show the logged-in user
pub async fn run_status(session: &mut Session) -> Result<(), Box<dyn std::error::Error>> {
    let spinner = create_spinner("Fetching user...", session.quiet());
    let result = session.client.me().await;
    finish_spinner(spinner);

    let user = result?;
    session.config.user = Some(user.name.clone());
    session.config.username = Some(user.username.clone());
    output_one(&user, &session.output);
    Ok(())
}

/// User behind the stored token, if it still works
async fn current_user(config: &CliConfig, server_url: &str) -> Option<User> {
    let token = config.token.as_deref().filter(|t| !t.is_empty())?;
    match ZeaburClient::new(token.to_string(), server_url).me().await {
        Ok(user) => Some(user),
        Err(e) => {
            debug!("Stored token is not usable, logging in again: {}", e);
            None
        }
    }
}

/// Run the browser confirm flow and return the API key it posts back
async fn browser_login() -> Result<String, CliError> {
    let server = CallbackServer::bind().await?;
    let callback_url = server.callback_url()?;
    let state = nonce(&callback_url);

    let url = confirm_url(&callback_url, &state);
    eprintln!("Open this URL in your browser to confirm the login:\n\n  {}\n", url);

    let token = server
        .wait_for_token(Duration::from_secs(auth::CALLBACK_TIMEOUT_SECS))
        .await?;
    if token.state != state {
        warn!("Login callback carried an unexpected state");
        return Err(CliError::Auth("state mismatch".to_string()));
    }
    if token.api_key.is_empty() {
        return Err(CliError::Auth("no API key received".to_string()));
    }
    Ok(token.api_key)
}

fn confirm_url(callback_url: &str, state: &str) -> String {
    format!(
        "{}?client_name={}&state={}&callback_url={}",
        auth::API_KEY_CONFIRM_URL,
        urlencoding::encode(auth::CLIENT_NAME),
        urlencoding::encode(state),
        urlencoding::encode(callback_url)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_me(server: &MockServer, token: &str) {
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .and(header("Authorization", format!("Bearer {}", token).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": { "me": {
                    "_id": "u-1", "name": "Ada", "username": "ada", "email": "ada@example.com"
                } }
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn test_confirm_url_encodes_callback() {
        let url = confirm_url("http://localhost:4321/callback", "abc");
        assert!(url.starts_with(auth::API_KEY_CONFIRM_URL));
        assert!(url.contains("client_name=zeabur-cli"));
        assert!(url.contains("state=abc"));
        assert!(url.contains("callback_url=http%3A%2F%2Flocalhost%3A4321%2Fcallback"));
    }

    #[tokio::test]
    async fn test_login_with_token_stores_identity() {
        let mock_server = MockServer::start().await;
        mount_me(&mock_server, "tok-1").await;

        let mut config = CliConfig::default();
        run_login(&mut config, Some("tok-1"), &mock_server.uri(), false)
            .await
            .unwrap();

        assert_eq!(config.token.as_deref(), Some("tok-1"));
        assert_eq!(config.user.as_deref(), Some("Ada"));
        assert_eq!(config.username.as_deref(), Some("ada"));
    }

    #[tokio::test]
    async fn test_login_with_rejected_token_stores_nothing() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/graphql"))
            .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
            .mount(&mock_server)
            .await;

        let mut config = CliConfig::default();
        let result = run_login(&mut config, Some("bad"), &mock_server.uri(), false).await;
        assert!(result.is_err());
        assert!(config.token.is_none());
    }

    #[test]
    fn test_logout_clears_credentials() {
        let mut config = CliConfig {
            token: Some("tok".to_string()),
            user: Some("Ada".to_string()),
            username: Some("ada".to_string()),
            ..Default::default()
        };
        run_logout(&mut config);
        assert!(config.token.is_none());
        assert!(config.user.is_none());
    }
}
