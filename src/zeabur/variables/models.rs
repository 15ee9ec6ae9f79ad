//! Variable data models

use serde::{Deserialize, Serialize};

use crate::output::Tabler;

/// Environment variable of a service
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Variable {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(rename = "serviceID", default)]
    pub service_id: String,
}

impl Tabler for Variable {
    fn headers() -> Vec<&'static str> {
        vec!["Key", "Value"]
    }

    fn row(&self) -> Vec<String> {
        vec![self.key.clone(), self.value.clone()]
    }
}
