//! Environment module

mod api;
mod models;

pub use models::Environment;
