//! Session state, background lookups and the play screen

pub mod lookup;
pub mod screen;
pub mod state;

pub use screen::PlayScreen;
pub use state::{GameSession, Phase, RefillOutcome, SessionError, SessionOptions, SessionView};
