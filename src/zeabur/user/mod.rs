//! Current user

mod api;
mod models;

pub use models::User;
