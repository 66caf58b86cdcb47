//! Word assembly from board occupants

use super::board::{Snapshot, BOARD_LEN};

/// Character shown for an empty square.
pub const PLACEHOLDER: char = '-';

/// Build the display word for a board snapshot.
///
/// Empty squares render as [`PLACEHOLDER`]. Leading and trailing
/// placeholders are trimmed, interior ones are kept (they mark a gap),
/// and the result is padded back to [`BOARD_LEN`] characters.
pub fn assemble(snapshot: &Snapshot) -> String {
    let raw: String = snapshot
        .iter()
        .map(|square| square.map_or(PLACEHOLDER, |tile| tile.letter))
        .collect();
    let trimmed = raw.trim_matches(PLACEHOLDER);

    let mut word = String::with_capacity(BOARD_LEN);
    word.push_str(trimmed);
    word.extend(std::iter::repeat(PLACEHOLDER).take(BOARD_LEN - trimmed.chars().count()));
    word
}

/// The word shown when nothing is on the board.
pub fn blank() -> String {
    std::iter::repeat(PLACEHOLDER).take(BOARD_LEN).collect()
}
