//! api/mod.rs
pub mod client;
pub mod dispatcher;

pub use client::{validate_input, ApiClient};
pub use dispatcher::{spawn_health_check, Busy, DispatchEvent, Dispatcher};
