//! Common traits and wrappers for Zeabur resources

use serde::Deserialize;

/// Common trait for resources that can be picked by id or name
/// (projects, environments, services, templates)
pub trait ZeaburResource {
    /// Get the resource ID
    fn id(&self) -> &str;

    /// Get the human-readable name
    fn name(&self) -> &str;

    /// Check if the resource matches by name or ID
    fn matches(&self, input: &str) -> bool {
        self.id() == input || self.name() == input
    }
}

/// Relay-style page info
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
}

#[derive(Deserialize, Debug)]
pub struct Edge<T> {
    pub node: T,
}

/// Generic GraphQL connection (`edges[].node` + `pageInfo`)
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default)]
    pub page_info: PageInfo,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Connection<T> {
    pub fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|edge| edge.node).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestResource {
        id: String,
        name: String,
    }

    impl ZeaburResource for TestResource {
        fn id(&self) -> &str {
            &self.id
        }

        fn name(&self) -> &str {
            &self.name
        }
    }

    #[test]
    fn test_matches_by_id_or_name() {
        let resource = TestResource {
            id: "65a1".to_string(),
            name: "web".to_string(),
        };
        assert!(resource.matches("65a1"));
        assert!(resource.matches("web"));
        assert!(!resource.matches("Web"));
    }

    #[test]
    fn test_connection_into_nodes() {
        let json = r#"{"pageInfo":{"hasNextPage":true},"edges":[{"node":1},{"node":2}]}"#;
        let conn: Connection<u32> = serde_json::from_str(json).unwrap();
        assert!(conn.page_info.has_next_page);
        assert_eq!(conn.into_nodes(), vec![1, 2]);
    }

    #[test]
    fn test_connection_missing_fields_default() {
        let conn: Connection<u32> = serde_json::from_str("{}").unwrap();
        assert!(!conn.page_info.has_next_page);
        assert!(conn.into_nodes().is_empty());
    }
}
