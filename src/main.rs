//! zeabur - Main entry point

use clap::Parser;
use log::{debug, info};

use zeabur_cli::auth::{run_login, run_logout, run_status};
use zeabur_cli::cli::{AuthAction, ContextAction};
use zeabur_cli::context::{run_context_clear, run_context_command, run_context_get};
use zeabur_cli::output::OutputOptions;
use zeabur_cli::zeabur::{
    run_deployment_command, run_domain_command, run_project_command, run_service_command,
    run_template_command, run_variable_command,
};
use zeabur_cli::{Cli, CliConfig, Command, ConfigStore, Session, TokenResolver, ZeaburClient};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&cli.log_level))
        .init();

    info!("Starting zeabur v{}", env!("CARGO_PKG_VERSION"));
    debug!(
        "CLI args: interactive={}, output={}, no_header={}, config={:?}",
        cli.interactive, cli.output, cli.no_header, cli.config
    );

    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let store = match &cli.config {
        Some(path) => ConfigStore::with_path(path.clone()),
        None => ConfigStore::new(),
    };
    debug!("Using config file {}", store.path().display());

    let mut config = store.load()?;
    let output = OutputOptions {
        format: cli.output,
        no_header: cli.no_header,
    };
    let server_url = ZeaburClient::server_url_from_env();

    if cli.command.is_offline() {
        run_offline(&cli, &mut config, &output, &server_url).await?;
        store.save(&config)?;
        return Ok(());
    }

    let token = TokenResolver::resolve(cli.token.as_deref(), config.token.as_deref())?;
    let client = ZeaburClient::new(token, &server_url);
    let mut session = Session::new(client, config, cli.interactive, output);

    match &cli.command {
        Command::Auth { action } => match action {
            AuthAction::Status => run_status(&mut session).await?,
            AuthAction::Login | AuthAction::Logout => unreachable_offline()?,
        },
        Command::Context { action } => run_context_command(action, &mut session).await?,
        Command::Project { action } => run_project_command(action, &mut session).await?,
        Command::Service { action } => run_service_command(action, &mut session).await?,
        Command::Deployment { action } => run_deployment_command(action, &mut session).await?,
        Command::Domain { action } => run_domain_command(action, &mut session).await?,
        Command::Variable { action } => run_variable_command(action, &mut session).await?,
        Command::Template { action } => run_template_command(action, &mut session).await?,
    }

    store.save(&session.config)?;
    info!("Completed successfully");
    Ok(())
}

/// Commands that only touch the config file, or bring their own token
async fn run_offline(
    cli: &Cli,
    config: &mut CliConfig,
    output: &OutputOptions,
    server_url: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    match &cli.command {
        Command::Auth {
            action: AuthAction::Login,
        } => run_login(config, cli.token.as_deref(), server_url, cli.interactive).await,
        Command::Auth {
            action: AuthAction::Logout,
        } => {
            run_logout(config);
            Ok(())
        }
        Command::Context {
            action: ContextAction::Get,
        } => {
            run_context_get(config, output);
            Ok(())
        }
        Command::Context {
            action: ContextAction::Clear,
        } => {
            run_context_clear(config);
            Ok(())
        }
        _ => unreachable_offline(),
    }
}

fn unreachable_offline() -> Result<(), Box<dyn std::error::Error>> {
    Err("command dispatched to the wrong handler".into())
}
