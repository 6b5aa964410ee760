//! Terminal chat client for a local test-case generation backend: submit
//! Python code or a feature description, get manual test cases and pytest
//! code back, then export or copy them.

pub mod api;
pub mod app;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod error;
pub mod export;
pub mod logger;
pub mod model;
pub mod render;
pub mod state;
pub mod ui;
