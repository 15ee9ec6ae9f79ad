//! Environment data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::time_ago;
use crate::output::Tabler;
use crate::zeabur::traits::ZeaburResource;

/// Project environment (e.g. production)
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Environment {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(rename = "projectID", default)]
    pub project_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ZeaburResource for Environment {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Tabler for Environment {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            time_ago(self.created_at.as_ref()),
        ]
    }
}
