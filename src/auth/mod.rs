//! Authentication: browser login, token storage and status

mod callback;
mod commands;

pub use callback::{CallbackServer, CallbackToken};
pub use commands::{run_login, run_logout, run_status};
