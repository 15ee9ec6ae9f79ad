//! Deployment and log data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::{rfc3339, time_ago, truncate};
use crate::output::Tabler;

/// One deployment of a service
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Deployment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "projectID", default)]
    pub project_id: String,
    #[serde(rename = "serviceID", default)]
    pub service_id: String,
    #[serde(rename = "environmentID", default)]
    pub environment_id: String,
    #[serde(default)]
    pub git_provider: Option<String>,
    #[serde(default)]
    pub repo_owner: Option<String>,
    #[serde(default)]
    pub repo_name: Option<String>,
    #[serde(rename = "ref", default)]
    pub git_ref: Option<String>,
    #[serde(rename = "commitSHA", default)]
    pub commit_sha: Option<String>,
    #[serde(default)]
    pub commit_message: Option<String>,
    #[serde(default)]
    pub plan_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub finished_at: Option<DateTime<Utc>>,
}

impl Tabler for Deployment {
    fn headers() -> Vec<&'static str> {
        vec![
            "ID",
            "RepoName",
            "Status",
            "Ref",
            "CommitMessage",
            "PlanType",
            "CreatedAt",
            "CommitSHA",
        ]
    }

    fn row(&self) -> Vec<String> {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        vec![
            self.id.clone(),
            text(&self.repo_name),
            self.status.clone(),
            text(&self.git_ref),
            truncate(self.commit_message.as_deref().unwrap_or_default(), 20),
            self.plan_type.clone(),
            time_ago(self.created_at.as_ref()),
            truncate(self.commit_sha.as_deref().unwrap_or_default(), 8),
        ]
    }
}

/// A single log line
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub message: String,
}

impl LogEntry {
    /// Identity used to drop duplicates while polling
    pub fn key(&self) -> (DateTime<Utc>, String) {
        (self.timestamp, self.message.clone())
    }

    /// `<RFC3339 timestamp> <message>`
    pub fn line(&self) -> String {
        format!("{} {}", rfc3339(Some(&self.timestamp)), self.message)
    }
}

impl Tabler for LogEntry {
    fn headers() -> Vec<&'static str> {
        vec!["Message", "Timestamp"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.message.clone(), rfc3339(Some(&self.timestamp))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deployment_row_truncates() {
        let json = r#"{
            "_id": "d-1",
            "repoName": "blog",
            "status": "RUNNING",
            "ref": "main",
            "commitSHA": "0123456789abcdef",
            "commitMessage": "fix: handle empty config file on startup",
            "planType": "nodejs"
        }"#;
        let deployment: Deployment = serde_json::from_str(json).unwrap();
        let row = deployment.row();
        assert_eq!(row[1], "blog");
        assert_eq!(row[4], "fix: handle empty co...");
        assert_eq!(row[7], "01234567...");
    }

    #[test]
    fn test_deployment_without_git_info() {
        let deployment: Deployment =
            serde_json::from_str(r#"{"_id":"d-2","status":"BUILDING"}"#).unwrap();
        let row = deployment.row();
        assert_eq!(row[1], "");
        assert_eq!(row[7], "");
    }

    #[test]
    fn test_log_entry_line() {
        let entry: LogEntry = serde_json::from_str(
            r#"{"timestamp":"2024-05-06T07:08:09Z","message":"listening on :8080"}"#,
        )
        .unwrap();
        assert_eq!(entry.line(), "2024-05-06T07:08:09Z listening on :8080");
    }
}
