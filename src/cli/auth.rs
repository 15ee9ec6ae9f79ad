//! Auth CLI arguments

use clap::Subcommand;

/// Authentication subcommands
#[derive(Subcommand, Debug)]
pub enum AuthAction {
    /// Log in through the browser, or store the token given with --token
    Login,

    /// Forget the stored token
    Logout,

    /// Show the logged-in user
    Status,
}
