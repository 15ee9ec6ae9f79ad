/// Configuration constants for the Zeabur GraphQL API
pub mod api {
    /// Default server base URL
    pub const DEFAULT_SERVER_URL: &str = "https://api.zeabur.com";

    /// Env var overriding the server base URL
    pub const SERVER_URL_ENV_VAR: &str = "ZEABUR_SERVER_URL";

    /// GraphQL endpoint path appended to the server URL
    pub const GRAPHQL_PATH: &str = "/graphql";

    /// Page size used when walking a whole connection
    pub const MAX_PAGE_SIZE: i64 = 100;

    /// Page size used when a caller passes an out-of-range limit
    pub const DEFAULT_PAGE_SIZE: i64 = 5;

    /// Domain suffix of service names on a project's private network
    pub const PRIVATE_DNS_SUFFIX: &str = "zeabur.internal";
}

/// Configuration constants for authentication
pub mod auth {
    /// Environment variable holding a static API token
    pub const TOKEN_ENV_VAR: &str = "ZEABUR_TOKEN";

    /// Dashboard page that confirms an API key for the CLI
    pub const API_KEY_CONFIRM_URL: &str = "https://zeabur.com/cli-confirm";

    /// Client name reported to the confirm page
    pub const CLIENT_NAME: &str = "zeabur-cli";

    /// Path the browser posts the key back to
    pub const CALLBACK_PATH: &str = "/callback";

    /// Seconds to wait for the browser callback
    pub const CALLBACK_TIMEOUT_SECS: u64 = 300;
}

/// Configuration constants for the config file
pub mod context {
    /// Directory under the home dir holding the config file
    pub const DIR_NAME: &str = ".config/zeabur";

    /// Config file name
    pub const FILE_NAME: &str = "cli.yaml";

    /// Env var overriding the config file location
    pub const CONFIG_ENV_VAR: &str = "ZEABUR_CONFIG";
}

/// Default values for CLI
pub mod defaults {
    /// Default log level
    pub const LOG_LEVEL: &str = "warn";

    /// Seconds between polls while watching logs
    pub const LOG_POLL_INTERVAL_SECS: u64 = 2;

    /// Hours of metrics shown by default
    pub const METRIC_HOURS: i64 = 2;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_path_format() {
        assert!(api::GRAPHQL_PATH.starts_with('/'));
        assert!(!api::DEFAULT_SERVER_URL.ends_with('/'));
    }

    #[test]
    fn test_page_sizes() {
        assert!(api::DEFAULT_PAGE_SIZE > 0);
        assert!(api::MAX_PAGE_SIZE <= 100);
    }

    #[test]
    fn test_token_env_var() {
        assert_eq!(auth::TOKEN_ENV_VAR, "ZEABUR_TOKEN");
    }
}
