//! Config file and session context data models

use serde::{Deserialize, Serialize};

/// Minimal (id, name) identifier pair for a project, environment or service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BasicInfo {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
}

impl BasicInfo {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Nothing is known about the resource: both id and name are empty
    pub fn is_empty(&self) -> bool {
        self.id.is_empty() && self.name.is_empty()
    }

    /// At least one half of the pair is missing
    pub fn is_incomplete(&self) -> bool {
        self.id.is_empty() || self.name.is_empty()
    }
}

/// The CLI's remembered current project, environment and service.
///
/// Environment and service are scoped to a project, so every change of
/// the project id drops both of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    #[serde(default, skip_serializing_if = "BasicInfo::is_empty")]
    project: BasicInfo,
    #[serde(default, skip_serializing_if = "BasicInfo::is_empty")]
    environment: BasicInfo,
    #[serde(default, skip_serializing_if = "BasicInfo::is_empty")]
    service: BasicInfo,
}

impl Context {
    pub fn project(&self) -> &BasicInfo {
        &self.project
    }

    /// Set the current project. Switching to a different project id clears
    /// the environment and service slots.
    pub fn set_project(&mut self, project: BasicInfo) {
        if project.id != self.project.id {
            self.environment = BasicInfo::default();
            self.service = BasicInfo::default();
        }
        self.project = project;
    }

    /// Clearing the project also clears everything scoped to it
    pub fn clear_project(&mut self) {
        self.clear_all();
    }

    pub fn environment(&self) -> &BasicInfo {
        &self.environment
    }

    pub fn set_environment(&mut self, environment: BasicInfo) {
        self.environment = environment;
    }

    pub fn clear_environment(&mut self) {
        self.environment = BasicInfo::default();
    }

    pub fn service(&self) -> &BasicInfo {
        &self.service
    }

    pub fn set_service(&mut self, service: BasicInfo) {
        self.service = service;
    }

    pub fn clear_service(&mut self) {
        self.service = BasicInfo::default();
    }

    pub fn clear_all(&mut self) {
        self.project = BasicInfo::default();
        self.environment = BasicInfo::default();
        self.service = BasicInfo::default();
    }
}

/// Top-level config file document (~/.config/zeabur/cli.yaml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    /// API token (stored in config file)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    /// Display name of the logged-in user
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Handle of the logged-in user, used for owner/name lookups
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default)]
    pub context: Context,
}

impl CliConfig {
    /// Forget the stored credentials and user identity
    pub fn clear_credentials(&mut self) {
        self.token = None;
        self.user = None;
        self.username = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_info_empty_requires_both_halves_missing() {
        assert!(BasicInfo::default().is_empty());
        assert!(!BasicInfo::new("p-1", "").is_empty());
        assert!(!BasicInfo::new("", "web").is_empty());
    }

    #[test]
    fn test_basic_info_incomplete_when_either_half_missing() {
        assert!(BasicInfo::new("p-1", "").is_incomplete());
        assert!(BasicInfo::new("", "web").is_incomplete());
        assert!(!BasicInfo::new("p-1", "web").is_incomplete());
    }

    #[test]
    fn test_set_project_clears_children_on_change() {
        let mut ctx = Context::default();
        ctx.set_project(BasicInfo::new("p-1", "alpha"));
        ctx.set_environment(BasicInfo::new("e-1", "production"));
        ctx.set_service(BasicInfo::new("s-1", "web"));

        ctx.set_project(BasicInfo::new("p-2", "beta"));

        assert_eq!(ctx.project(), &BasicInfo::new("p-2", "beta"));
        assert!(ctx.environment().is_empty());
        assert!(ctx.service().is_empty());
    }

    #[test]
    fn test_set_same_project_keeps_children() {
        let mut ctx = Context::default();
        ctx.set_project(BasicInfo::new("p-1", "alpha"));
        ctx.set_environment(BasicInfo::new("e-1", "production"));
        ctx.set_service(BasicInfo::new("s-1", "web"));

        ctx.set_project(BasicInfo::new("p-1", "alpha-renamed"));

        assert_eq!(ctx.project().name, "alpha-renamed");
        assert_eq!(ctx.environment().id, "e-1");
        assert_eq!(ctx.service().id, "s-1");
    }

    #[test]
    fn test_clear_project_clears_everything() {
        let mut ctx = Context::default();
        ctx.set_project(BasicInfo::new("p-1", "alpha"));
        ctx.set_service(BasicInfo::new("s-1", "web"));
        ctx.clear_project();
        assert_eq!(ctx, Context::default());
    }

    #[test]
    fn test_clear_service_keeps_project() {
        let mut ctx = Context::default();
        ctx.set_project(BasicInfo::new("p-1", "alpha"));
        ctx.set_service(BasicInfo::new("s-1", "web"));
        ctx.clear_service();
        assert_eq!(ctx.project().id, "p-1");
        assert!(ctx.service().is_empty());
    }

    #[test]
    fn test_clear_environment_keeps_service() {
        let mut ctx = Context::default();
        ctx.set_project(BasicInfo::new("p-1", "alpha"));
        ctx.set_environment(BasicInfo::new("e-1", "production"));
        ctx.set_service(BasicInfo::new("s-1", "web"));
        ctx.clear_environment();
        assert!(ctx.environment().is_empty());
        assert_eq!(ctx.service().id, "s-1");
    }

    #[test]
    fn test_empty_slots_are_not_serialized() {
        let mut config = CliConfig::default();
        config.context.set_project(BasicInfo::new("p-1", "alpha"));
        let yaml = serde_yml::to_string(&config).unwrap();
        assert!(yaml.contains("project"));
        assert!(!yaml.contains("environment"));
        assert!(!yaml.contains("token"));
    }

    #[test]
    fn test_deserialize_partial_document() {
        let yaml = "token: abc\ncontext:\n  project:\n    id: p-1\n";
        let config: CliConfig = serde_yml::from_str(yaml).unwrap();
        assert_eq!(config.token.as_deref(), Some("abc"));
        assert_eq!(config.context.project().id, "p-1");
        assert_eq!(config.context.project().name, "");
        assert!(config.context.service().is_empty());
    }

    #[test]
    fn test_clear_credentials_keeps_context() {
        let mut config = CliConfig {
            token: Some("tok".to_string()),
            user: Some("Ada".to_string()),
            username: Some("ada".to_string()),
            ..Default::default()
        };
        config.context.set_project(BasicInfo::new("p-1", "alpha"));
        config.clear_credentials();
        assert!(config.token.is_none());
        assert!(config.username.is_none());
        assert_eq!(config.context.project().id, "p-1");
    }
}
