//! Project data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::time_ago;
use crate::output::Tabler;
use crate::zeabur::traits::ZeaburResource;

/// Project data from the Zeabur API
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub region: Option<Region>,
}

impl ZeaburResource for Project {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Tabler for Project {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Description", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.description.clone(),
            time_ago(self.created_at.as_ref()),
        ]
    }
}

/// Deployment region
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Region {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub provider: Option<String>,
}

impl Region {
    /// Label shown in the region picker, e.g. "Tokyo, Japan (hnd1)"
    pub fn label(&self) -> String {
        format!("{} ({})", self.description, self.name)
    }
}

/// Template YAML exported from a project environment
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct ExportedTemplate {
    #[serde(rename = "resourceYAML", default)]
    pub resource_yaml: String,
    #[serde(default)]
    pub warnings: Vec<String>,
}
