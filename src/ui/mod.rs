//! ui/mod.rs
pub mod helpers;
pub mod main_ui;
pub mod transcript;
pub mod tui;

pub use main_ui::handle_event;
pub use tui::draw_ui;
