//! zeabur - Manage Zeabur projects, services and deployments from the terminal
//!
//! Commands take their project, environment and service from flags, then
//! from the context saved in the config file, then from an interactive
//! prompt.
//!
//! # Features
//!
//! - Browser or token login
//! - Projects, environments, services, domains and variables
//! - Deployment logs, optionally followed live
//! - Template create, update and deploy
//! - Table, JSON or YAML output
//!
//! # Example
//!
//! ```bash
//! # Log in through the browser
//! zeabur auth login
//!
//! # Pick the project commands default to
//! zeabur context set project
//!
//! # Restart a service without prompting
//! zeabur service restart --name web -y
//!
//! # Follow runtime logs
//! zeabur deployment log --name web -w
//!
//! # Scripted use
//! zeabur -i false project list -o json
//! ```

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod output;
pub mod resolve;
pub mod session;
pub mod ui;
pub mod zeabur;

pub use cli::{Cli, Command, OutputFormat};
pub use context::{BasicInfo, CliConfig, ConfigStore, Context};
pub use error::{CliError, Result};
pub use session::Session;
pub use zeabur::{TokenResolver, ZeaburClient};
