//! Template data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::rfc3339;
use crate::output::Tabler;
use crate::zeabur::traits::ZeaburResource;

/// Template published by the user
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub code: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub deployment_cnt: i64,
    #[serde(rename = "previewURL", default)]
    pub preview_url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl ZeaburResource for Template {
    fn id(&self) -> &str {
        &self.code
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl Tabler for Template {
    fn headers() -> Vec<&'static str> {
        vec!["Code", "Name", "Description", "Created At"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.code.clone(),
            self.name.clone(),
            self.description.clone(),
            rfc3339(self.created_at.as_ref()),
        ]
    }
}

/// Project created by deploying a template
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct DeployedProject {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
}
