use std::fmt;

/// Custom error type for CLI operations
#[derive(Debug)]
pub enum CliError {
    /// HTTP request failed
    Http(reqwest::Error),
    /// API returned a non-success status code
    Api { status: u16, message: String },
    /// GraphQL endpoint answered with an `errors` array
    GraphQl(Vec<String>),
    /// Token not found in any source
    TokenNotFound(String),
    /// Failed to read, parse or write the config file
    Config(String),
    /// JSON parsing error
    Json(String),
    /// Interactive selection could not produce a value
    Selection(String),
    /// A required parameter is missing or malformed
    InvalidParam(String),
    /// A named resource does not exist
    NotFound(String),
    /// Login flow failed
    Auth(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Http(e) => write!(f, "HTTP request failed: {}", e),
            CliError::Api { status, message } => {
                write!(f, "API error (status {}): {}", status, message)
            }
            CliError::GraphQl(messages) => write!(f, "GraphQL error: {}", messages.join("; ")),
            CliError::TokenNotFound(msg) => write!(f, "{}", msg),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
            CliError::Json(msg) => write!(f, "JSON error: {}", msg),
            CliError::Selection(msg) => write!(f, "{}", msg),
            CliError::InvalidParam(msg) => write!(f, "{}", msg),
            CliError::NotFound(msg) => write!(f, "{}", msg),
            CliError::Auth(msg) => write!(f, "Login failed: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for CliError {
    fn from(err: reqwest::Error) -> Self {
        CliError::Http(err)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Json(err.to_string())
    }
}

impl From<serde_yml::Error> for CliError {
    fn from(err: serde_yml::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Config(err.to_string())
    }
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Selection(format!("prompt failed: {}", err))
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
