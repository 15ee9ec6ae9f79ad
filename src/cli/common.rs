//! Common CLI types shared across commands

use clap::{Args, ValueEnum};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Borderless table (default)
    Table,
    /// Pretty-printed JSON
    Json,
    /// YAML document
    Yaml,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Yaml => write!(f, "yaml"),
        }
    }
}

/// Flags that pick a service and the environment it runs in.
///
/// Anything left out falls back to the current context, then to an
/// interactive selection.
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceTargetArgs {
    /// Service ID
    #[arg(long)]
    pub id: Option<String>,

    /// Service name (looked up in the current project)
    #[arg(long)]
    pub name: Option<String>,

    /// Environment ID
    #[arg(long = "env-id")]
    pub env_id: Option<String>,
}

/// Project ID or name
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectTargetArgs {
    /// Project ID
    #[arg(long)]
    pub id: Option<String>,

    /// Project name (owned by the logged-in user)
    #[arg(long)]
    pub name: Option<String>,
}

/// Parse a `KEY=VALUE` pair
pub fn parse_key_value(s: &str) -> Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("invalid KEY=VALUE pair: '{}'", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty key in '{}'", s));
    }
    Ok((key.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_display() {
        assert_eq!(OutputFormat::Table.to_string(), "table");
        assert_eq!(OutputFormat::Json.to_string(), "json");
        assert_eq!(OutputFormat::Yaml.to_string(), "yaml");
    }

    #[test]
    fn test_parse_key_value() {
        assert_eq!(
            parse_key_value("PORT=8080").unwrap(),
            ("PORT".to_string(), "8080".to_string())
        );
        assert_eq!(
            parse_key_value("DSN=postgres://u:p@h/db?x=1").unwrap(),
            ("DSN".to_string(), "postgres://u:p@h/db?x=1".to_string())
        );
        assert_eq!(
            parse_key_value("EMPTY=").unwrap(),
            ("EMPTY".to_string(), String::new())
        );
        assert!(parse_key_value("novalue").is_err());
        assert!(parse_key_value("=x").is_err());
    }
}
