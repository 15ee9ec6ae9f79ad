//! Service data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::{rfc3339, time_ago};
use crate::output::Tabler;
use crate::zeabur::domains::Domain;
use crate::zeabur::traits::ZeaburResource;

/// Service as listed in a project
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub template: String,
    #[serde(default)]
    pub project: Option<ProjectRef>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Bare reference to the owning project
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ProjectRef {
    #[serde(rename = "_id")]
    pub id: String,
}

impl Service {
    pub fn project_id(&self) -> Option<&str> {
        self.project.as_ref().map(|p| p.id.as_str())
    }
}

impl ZeaburResource for Service {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Tabler for Service {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Type", "CreatedAt"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.template.clone(),
            time_ago(self.created_at.as_ref()),
        ]
    }
}

/// Service plus the state it has in one environment
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ServiceDetail {
    #[serde(flatten)]
    pub service: Service,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "consoleURL", default)]
    pub console_url: String,
    #[serde(default)]
    pub git_trigger: Option<GitTrigger>,
    #[serde(default)]
    pub domains: Vec<Domain>,
}

/// Git branch that triggers deployments
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GitTrigger {
    pub branch_name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(rename = "repoID", default)]
    pub repo_id: i64,
}

impl Tabler for ServiceDetail {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Status", "Domains", "Type", "GitTrigger", "CreatedAt"]
    }

    fn row(&self) -> Vec<String> {
        let domains: Vec<&str> = self.domains.iter().map(|d| d.domain.as_str()).collect();
        let git_trigger = match &self.git_trigger {
            Some(t) => format!("{}({})", t.branch_name, t.provider),
            None => "None".to_string(),
        };
        vec![
            self.service.id.clone(),
            self.service.name.clone(),
            self.status.clone(),
            domains.join(","),
            self.service.template.clone(),
            git_trigger,
            rfc3339(self.service.created_at.as_ref()),
        ]
    }
}

/// Temporary TCP port opened with `service expose`
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct TempTcpPort {
    #[serde(rename = "serviceID", default)]
    pub service_id: String,
    #[serde(rename = "environmentID", default)]
    pub environment_id: String,
    pub target_port: i64,
    pub node_port: i64,
    pub remain_seconds: i64,
}

impl Tabler for TempTcpPort {
    fn headers() -> Vec<&'static str> {
        vec!["TargetPort", "NodePort", "RemainSeconds"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.target_port.to_string(),
            self.node_port.to_string(),
            self.remain_seconds.to_string(),
        ]
    }
}

/// Connection instruction (password, URL, ...) of a prebuilt service
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ServiceInstruction {
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "type", default)]
    pub instruction_type: String,
}

impl Tabler for ServiceInstruction {
    fn headers() -> Vec<&'static str> {
        vec!["Title", "Content", "Category"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.title.clone(),
            self.content.clone(),
            self.category.clone(),
        ]
    }
}

/// One metric sample
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MetricSample {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}
