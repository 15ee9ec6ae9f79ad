//! Per-invocation state shared by command handlers

use crate::cli::ServiceTargetArgs;
use crate::context::{CliConfig, Context};
use crate::error::Result;
use crate::output::OutputOptions;
use crate::resolve::{resolve_service_target, ParamFiller, Selector, ServiceFilter, ServiceTarget};
use crate::ui::{NonInteractivePrompter, Prompter, TerminalPrompter};
use crate::zeabur::ZeaburClient;

/// Everything a command needs: the API client, a way to ask questions,
/// the loaded config (whose context the command may change) and the
/// output settings.
pub struct Session {
    pub client: ZeaburClient,
    pub config: CliConfig,
    pub interactive: bool,
    pub output: OutputOptions,
    prompter: Box<dyn Prompter>,
}

impl Session {
    /// Session with a terminal prompter, or one that refuses to prompt
    /// when `interactive` is false
    pub fn new(
        client: ZeaburClient,
        config: CliConfig,
        interactive: bool,
        output: OutputOptions,
    ) -> Self {
        let prompter: Box<dyn Prompter> = if interactive {
            Box::new(TerminalPrompter::new())
        } else {
            Box::new(NonInteractivePrompter)
        };
        Self::with_prompter(client, config, interactive, output, prompter)
    }

    pub fn with_prompter(
        client: ZeaburClient,
        config: CliConfig,
        interactive: bool,
        output: OutputOptions,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        Self {
            client,
            config,
            interactive,
            output,
            prompter,
        }
    }

    pub fn prompter(&self) -> &dyn Prompter {
        self.prompter.as_ref()
    }

    /// Spinners stay hidden in non-interactive runs
    pub fn quiet(&self) -> bool {
        !self.interactive
    }

    pub fn context(&self) -> &Context {
        &self.config.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.config.context
    }

    pub fn selector(&self) -> Selector<'_> {
        Selector::new(&self.client, self.prompter.as_ref())
    }

    /// A filler plus mutable access to the context it fills from
    pub fn filler_and_context(&mut self) -> (ParamFiller<'_>, &mut Context) {
        let filler = ParamFiller::new(Selector::new(&self.client, self.prompter.as_ref()));
        (filler, &mut self.config.context)
    }

    /// Resolve the common service flags
    pub async fn service_target(&mut self, args: &ServiceTargetArgs) -> Result<ServiceTarget> {
        let interactive = self.interactive;
        let (filler, ctx) = self.filler_and_context();
        resolve_service_target(&filler, ctx, args, interactive).await
    }

    /// Like [`Self::service_target`], prompting only with services that
    /// pass `filter`
    pub async fn service_target_filtered(
        &mut self,
        args: &ServiceTargetArgs,
        filter: ServiceFilter,
    ) -> Result<ServiceTarget> {
        let interactive = self.interactive;
        let (filler, ctx) = self.filler_and_context();
        let filler = filler.with_service_filter(filter);
        resolve_service_target(&filler, ctx, args, interactive).await
    }

    /// Handle of the logged-in user, fetched once and remembered
    pub async fn username(&mut self) -> Result<String> {
        if let Some(username) = self.config.username.as_ref().filter(|u| !u.is_empty()) {
            return Ok(username.clone());
        }
        let user = self.client.me().await?;
        self.config.user = Some(user.name.clone());
        self.config.username = Some(user.username.clone());
        Ok(user.username)
    }

    /// Project ID from an explicit flag, else the context, else a prompt.
    /// A prompted project becomes the current one.
    pub async fn project_id(&mut self, explicit: Option<&str>) -> Result<String> {
        if let Some(id) = explicit.filter(|id| !id.is_empty()) {
            return Ok(id.to_string());
        }
        crate::resolve::require_project_context(self.interactive, self.context())?;
        if !self.context().project().id.is_empty() {
            return Ok(self.context().project().id.clone());
        }

        let (info, _) = self
            .selector()
            .select_project(Default::default())
            .await?;
        let id = info.id.clone();
        self.context_mut().set_project(info);
        Ok(id)
    }
}

#[cfg(test)]
impl Session {
    /// Session against a mock server with scripted answers
    pub fn for_test(base_url: &str, prompter: crate::ui::testing::ScriptedPrompter) -> Self {
        Self::with_prompter(
            ZeaburClient::test_client(base_url),
            CliConfig::default(),
            true,
            OutputOptions::default(),
            Box::new(prompter),
        )
    }
}
