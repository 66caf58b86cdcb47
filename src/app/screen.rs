//! Play screen: keyboard commands mapped onto the game session
//!
//! Stands in for drag-and-drop. A cursor walks the board row; typing a
//! letter drops the matching rack tile under the cursor, digits pick a rack
//! slot directly, Backspace lifts the tile back to the rack.

use super::state::{GameSession, SessionError};
use crate::game::board::BOARD_LEN;

/// Keyboard-driven front end state wrapped around a session
pub struct PlayScreen {
    pub session: GameSession,
    /// Board square the cursor sits on
    pub cursor: usize,
    /// Feedback from the last command
    pub feedback: String,
    /// Whether the application should quit
    pub should_quit: bool,
}

impl PlayScreen {
    pub fn new(session: GameSession) -> Self {
        Self {
            session,
            cursor: 0,
            feedback: String::new(),
            should_quit: false,
        }
    }

    /// Signal the application to quit
    pub fn quit(&mut self) {
        self.should_quit = true;
    }

    pub fn cursor_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn cursor_right(&mut self) {
        if self.cursor + 1 < BOARD_LEN {
            self.cursor += 1;
        }
    }

    /// Drop the first rack tile with this letter under the cursor
    pub fn on_letter(&mut self, letter: char) {
        match self.session.rack().position_of(letter) {
            Some(slot) => self.place_slot(slot),
            None => {
                self.feedback = format!("No {} on your rack", letter.to_ascii_uppercase());
            }
        }
    }

    /// Drop the tile in rack slot `slot` (0-based) under the cursor
    pub fn place_slot(&mut self, slot: usize) {
        match self.session.place(self.cursor, slot) {
            Ok(()) => {
                self.feedback.clear();
                self.cursor_right();
            }
            Err(e) => self.feedback = describe(&e),
        }
    }

    /// Lift the tile under the cursor back onto the rack
    pub fn on_backspace(&mut self) {
        match self.session.remove(self.cursor) {
            Ok(tile) => self.feedback = format!("{} back on the rack", tile.letter),
            Err(e) => self.feedback = describe(&e),
        }
    }

    /// Advance to the next word, if the current one is valid
    pub fn on_enter(&mut self) {
        if !self.session.advance_enabled() {
            self.feedback = "Make a valid word first".to_string();
            return;
        }
        let banked = self.session.current_score();
        self.session.next_word();
        self.cursor = 0;
        self.feedback = format!("OK +{}", banked);
    }

    /// Throw everything away and start a new game
    pub fn on_start_over(&mut self) {
        self.session.start_over();
        self.cursor = 0;
        self.feedback = "New game".to_string();
    }

    /// Pick up finished dictionary checks (call every tick)
    pub fn poll(&mut self) -> bool {
        self.session.poll()
    }
}

fn describe(error: &SessionError) -> String {
    match error {
        SessionError::Placement(e) => format!("CLANK: {}", e),
        other => other.to_string(),
    }
}
