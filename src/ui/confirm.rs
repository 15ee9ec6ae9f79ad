//! Confirmation for destructive operations

use log::debug;

use crate::error::{CliError, Result};
use crate::ui::Prompter;

/// Ask before doing something destructive.
///
/// `--yes` skips the question. Without it, a prompter that cannot ask
/// (non-interactive mode) turns into an error telling the user to pass
/// `--yes`, rather than a silent "no".
pub fn confirm_action(prompter: &dyn Prompter, yes: bool, message: &str) -> Result<bool> {
    if yes {
        debug!("Confirmation skipped (--yes): {}", message);
        return Ok(true);
    }

    prompter.confirm(message, false).map_err(|e| match e {
        CliError::Selection(_) => {
            CliError::InvalidParam(format!("{} (pass --yes to confirm non-interactively)", message))
        }
        other => other,
    })
}
