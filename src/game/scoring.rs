//! Word scoring with bonus squares

use super::board::{BoardRow, Square};

/// Score the tiles on the board.
pub fn score(board: &BoardRow) -> u32 {
    score_squares(board.squares())
}

/// Sum tile values (doubled on double-letter squares), then double the sum
/// once for every occupied double-word square.
pub fn score_squares(squares: &[Square]) -> u32 {
    let mut total = 0;
    let mut word_multiplier = 1;
    for square in squares {
        if let Some(tile) = square.occupant {
            total += tile.value * square.bonus.letter_multiplier();
            word_multiplier *= square.bonus.word_multiplier();
        }
    }
    total * word_multiplier
}
