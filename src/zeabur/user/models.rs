//! User data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::output::common::time_ago;
use crate::output::Tabler;

/// The authenticated user
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub language: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Tabler for User {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "Name", "Username", "Email", "Language", "RegisteredAt"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.name.clone(),
            self.username.clone(),
            self.email.clone(),
            self.language.clone(),
            time_ago(self.created_at.as_ref()),
        ]
    }
}
