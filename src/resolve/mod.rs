//! Parameter resolution
//!
//! Commands need project, environment and service IDs. They come from
//! explicit flags, then from the saved context, then from an interactive
//! [`Selector`] prompt. [`ParamFiller`] applies that order, always
//! resolving the project before anything scoped to it.

mod fill;
mod selector;
mod target;

pub use fill::ParamFiller;
pub use selector::{
    SelectProjectOptions, SelectServiceOptions, Selector, ServiceFilter,
};
pub use target::{require_project_context, resolve_service_target, ServiceTarget};
