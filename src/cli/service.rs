//! Service CLI arguments

use clap::{Args, Subcommand, ValueEnum};

use super::common::ServiceTargetArgs;
use crate::config::defaults;

/// Service subcommands
#[derive(Subcommand, Debug)]
pub enum ServiceAction {
    /// List services of the current project
    #[command(visible_alias = "ls")]
    List(ServiceListArgs),

    /// Show service details
    Get(ServiceTargetArgs),

    /// Restart a service
    Restart(ServiceConfirmArgs),

    /// Redeploy a service
    Redeploy(ServiceConfirmArgs),

    /// Suspend a service
    Suspend(ServiceConfirmArgs),

    /// Delete a service
    #[command(visible_alias = "rm")]
    Delete(ServiceConfirmArgs),

    /// Expose a temporary TCP port
    Expose(ServiceTargetArgs),

    /// Show connection instructions
    Instruction(ServiceTargetArgs),

    /// Show the private network host name
    #[command(visible_alias = "net")]
    Network(ServiceTargetArgs),

    /// Show resource usage over the last hours
    Metric(ServiceMetricArgs),
}

/// Arguments for 'service list'
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceListArgs {
    /// Project ID (defaults to the current project)
    #[arg(long = "project-id")]
    pub project_id: Option<String>,

    /// Environment ID; when known, status and domains are included
    #[arg(long = "env-id")]
    pub env_id: Option<String>,
}

/// Service target plus confirmation skip
#[derive(Args, Debug, Clone, Default)]
pub struct ServiceConfirmArgs {
    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// Skip confirmation prompt
    #[arg(short = 'y', long, default_value_t = false)]
    pub yes: bool,
}

/// Arguments for 'service metric'
#[derive(Args, Debug, Clone)]
pub struct ServiceMetricArgs {
    /// Metric to show
    #[arg(value_enum)]
    pub metric: MetricType,

    #[command(flatten)]
    pub target: ServiceTargetArgs,

    /// How many hours back to look
    #[arg(long, default_value_t = defaults::METRIC_HOURS)]
    pub hour: i64,
}

/// Metric types
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MetricType {
    Cpu,
    Memory,
    Network,
}

impl MetricType {
    /// Name used by the API
    pub fn api_name(&self) -> &'static str {
        match self {
            MetricType::Cpu => "CPU",
            MetricType::Memory => "MEMORY",
            MetricType::Network => "NETWORK",
        }
    }

    /// Render a sample value with its unit
    pub fn format_value(&self, value: f64) -> String {
        match self {
            MetricType::Cpu => format!("{:.6}%", value * 100.0),
            MetricType::Memory | MetricType::Network => format!("{:.6}MB", value),
        }
    }
}

impl std::fmt::Display for MetricType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MetricType::Cpu => write!(f, "cpu"),
            MetricType::Memory => write!(f, "memory"),
            MetricType::Network => write!(f, "network"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_value_units() {
        assert_eq!(MetricType::Cpu.format_value(0.25), "25.000000%");
        assert_eq!(MetricType::Memory.format_value(128.5), "128.500000MB");
        assert_eq!(MetricType::Network.api_name(), "NETWORK");
    }
}
