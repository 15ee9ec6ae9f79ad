//! Domain data models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::rfc3339;
use crate::output::Tabler;

/// Domain bound to a service in one environment
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Domain {
    #[serde(rename = "_id", default)]
    pub id: String,
    pub domain: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub is_generated: bool,
    #[serde(default)]
    pub redirect_to: Option<String>,
    #[serde(rename = "serviceID", default)]
    pub service_id: String,
    #[serde(rename = "environmentID", default)]
    pub environment_id: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tabler for Domain {
    fn headers() -> Vec<&'static str> {
        vec!["Domain", "Status", "Generated", "RedirectTo", "CreatedAt"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.domain.clone(),
            self.status.clone(),
            self.is_generated.to_string(),
            self.redirect_to.clone().unwrap_or_default(),
            rfc3339(self.created_at.as_ref()),
        ]
    }
}

/// Result of a domain availability check
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct DomainAvailability {
    pub is_available: bool,
    #[serde(default)]
    pub reason: Option<String>,
}
