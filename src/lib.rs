//! TILEROW - one row of Scrabble
//!
//! Draw seven tiles, lay a word along a twelve-square row, score the
//! bonus squares. The `game` and `app` modules hold the rules and the
//! session; `tui` draws it in a terminal.

pub mod app;
pub mod config;
pub mod game;
pub mod logging;
pub mod tui;
