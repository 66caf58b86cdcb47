//! Terminal UI using ratatui

mod terminal;
mod ui;

pub use terminal::Tui;
pub use ui::render;
