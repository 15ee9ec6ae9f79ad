//! API token resolution from multiple sources

use log::debug;

use crate::config::auth;
use crate::error::{CliError, Result};

/// Token resolution with fallback logic
pub struct TokenResolver;

impl TokenResolver {
    /// Resolve token from multiple sources with fallback:
    /// 1. CLI argument (if provided)
    /// 2. ZEABUR_TOKEN environment variable
    /// 3. Token stored by `zeabur auth login`
    pub fn resolve(cli_token: Option<&str>, config_token: Option<&str>) -> Result<String> {
        let env_token = std::env::var(auth::TOKEN_ENV_VAR).ok();
        Self::resolve_from(cli_token, env_token.as_deref(), config_token)
    }

    fn resolve_from(
        cli_token: Option<&str>,
        env_token: Option<&str>,
        config_token: Option<&str>,
    ) -> Result<String> {
        if let Some(token) = non_empty(cli_token) {
            debug!("Using token from CLI argument");
            return Ok(token.to_string());
        }

        if let Some(token) = non_empty(env_token) {
            debug!("Using token from {} environment variable", auth::TOKEN_ENV_VAR);
            return Ok(token.to_string());
        }

        if let Some(token) = non_empty(config_token) {
            debug!("Using token from config file");
            return Ok(token.to_string());
        }

        Err(CliError::TokenNotFound(Self::token_not_found_message()))
    }

    /// Generate helpful error message when token is not found
    fn token_not_found_message() -> String {
        format!(
            "No API token found. Please provide a token using one of:\n\
             \n\
             1. Browser login:     zeabur auth login\n\
             2. CLI argument:      zeabur --token <TOKEN> ...\n\
             3. Environment var:   export {}=<TOKEN>",
            auth::TOKEN_ENV_VAR
        )
    }
}

/// Trimmed value, or `None` when blank
fn non_empty(token: Option<&str>) -> Option<&str> {
    token.map(str::trim).filter(|t| !t.is_empty())
}
