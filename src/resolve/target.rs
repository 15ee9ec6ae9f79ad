//! Resolution of the common `--id`/`--name`/`--env-id` service flags

use crate::cli::ServiceTargetArgs;
use crate::context::Context;
use crate::error::{CliError, Result};

use super::fill::ParamFiller;

/// A fully resolved service in one environment
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServiceTarget {
    pub project_id: String,
    pub service_id: String,
    /// May be empty when the service was given by `--id` only
    pub service_name: String,
    pub environment_id: String,
}

impl ServiceTarget {
    /// Name for messages, falling back to the ID
    pub fn label(&self) -> &str {
        if self.service_name.is_empty() {
            &self.service_id
        } else {
            &self.service_name
        }
    }
}

/// Fail when a non-interactive run has no project to work in
pub fn require_project_context(interactive: bool, ctx: &Context) -> Result<()> {
    if !interactive && ctx.project().id.is_empty() {
        return Err(CliError::InvalidParam(
            "please run <zeabur context set project> first".to_string(),
        ));
    }
    Ok(())
}

/// Resolve service flags against the context, prompting for what is left
pub async fn resolve_service_target(
    filler: &ParamFiller<'_>,
    ctx: &mut Context,
    args: &ServiceTargetArgs,
    interactive: bool,
) -> Result<ServiceTarget> {
    let mut service_id = args.id.clone().unwrap_or_default();
    let mut service_name = args.name.clone().unwrap_or_default();
    let mut environment_id = args.env_id.clone().unwrap_or_default();

    if service_id.is_empty() {
        require_project_context(interactive, ctx)?;
    }

    if service_id.is_empty() && service_name.is_empty() && !ctx.service().is_empty() {
        service_id = ctx.service().id.clone();
        service_name = ctx.service().name.clone();
    }
    if environment_id.is_empty() && !ctx.environment().is_empty() {
        environment_id = ctx.environment().id.clone();
    }

    // A service given by ID outside any project context: one lookup yields
    // both its project and its name.
    if !service_id.is_empty() && ctx.project().id.is_empty() {
        let service = filler
            .selector()
            .client()
            .get_service(&service_id, "", "", "")
            .await?;
        if service_name.is_empty() {
            service_name = service.name.clone();
        }
        let mut project_id = service.project_id().unwrap_or_default().to_string();
        filler.environment(&mut project_id, &mut environment_id).await?;
        return Ok(ServiceTarget {
            project_id,
            service_id,
            service_name,
            environment_id,
        });
    }

    filler
        .service_by_name_with_environment(ctx, &mut service_id, &mut service_name, &mut environment_id)
        .await?;

    Ok(ServiceTarget {
        project_id: ctx.project().id.clone(),
        service_id,
        service_name,
        environment_id,
    })
}
