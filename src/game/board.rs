//! The single-row board: twelve squares with fixed bonuses

use super::Tile;

/// Number of squares on the board row.
pub const BOARD_LEN: usize = 12;

/// Bonus printed on a square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Bonus {
    #[default]
    Plain,
    DoubleLetter,
    DoubleWord,
}

impl Bonus {
    /// Parse a bonus name as used by board layouts.
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "plain" => Some(Bonus::Plain),
            "double-letter" | "dl" => Some(Bonus::DoubleLetter),
            "double-word" | "dw" => Some(Bonus::DoubleWord),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Bonus::Plain => "plain",
            Bonus::DoubleLetter => "double-letter",
            Bonus::DoubleWord => "double-word",
        }
    }

    pub fn letter_multiplier(&self) -> u32 {
        match self {
            Bonus::DoubleLetter => 2,
            _ => 1,
        }
    }

    pub fn word_multiplier(&self) -> u32 {
        match self {
            Bonus::DoubleWord => 2,
            _ => 1,
        }
    }
}

/// Every bonus kind.
pub const BONUSES: [Bonus; 3] = [Bonus::Plain, Bonus::DoubleLetter, Bonus::DoubleWord];

/// Default layout, left to right.
pub const STANDARD_LAYOUT: [Bonus; BOARD_LEN] = [
    Bonus::Plain,
    Bonus::DoubleLetter,
    Bonus::Plain,
    Bonus::Plain,
    Bonus::DoubleWord,
    Bonus::Plain,
    Bonus::Plain,
    Bonus::DoubleWord,
    Bonus::Plain,
    Bonus::Plain,
    Bonus::DoubleLetter,
    Bonus::Plain,
];

/// Occupants of every square, left to right.
pub type Snapshot = [Option<Tile>; BOARD_LEN];

/// Reasons a placement is refused. The tile stays where it was.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementError {
    /// The square already holds a tile
    OccupiedSquare { index: usize },
    /// Neither neighbor is occupied and the board is not empty
    NonAdjacentPlacement { index: usize },
    /// No such square
    OutOfBounds { index: usize },
}

impl std::fmt::Display for PlacementError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementError::OccupiedSquare { index } => {
                write!(f, "square {} is already occupied", index + 1)
            }
            PlacementError::NonAdjacentPlacement { index } => {
                write!(f, "square {} is not next to a placed tile", index + 1)
            }
            PlacementError::OutOfBounds { index } => {
                write!(f, "square {} is off the board", index + 1)
            }
        }
    }
}

impl std::error::Error for PlacementError {}

/// Check whether a tile may go on `index` given the current occupants.
///
/// Allowed when the square is empty and either the board is empty or a
/// direct left/right neighbor holds a tile.
pub fn check_placement(snapshot: &Snapshot, index: usize) -> Result<(), PlacementError> {
    let Some(slot) = snapshot.get(index) else {
        return Err(PlacementError::OutOfBounds { index });
    };
    if slot.is_some() {
        return Err(PlacementError::OccupiedSquare { index });
    }

    let board_empty = snapshot.iter().all(Option::is_none);
    let left = index
        .checked_sub(1)
        .is_some_and(|i| snapshot[i].is_some());
    let right = snapshot.get(index + 1).is_some_and(Option::is_some);

    if board_empty || left || right {
        Ok(())
    } else {
        Err(PlacementError::NonAdjacentPlacement { index })
    }
}

/// One square of the row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Square {
    pub index: usize,
    pub bonus: Bonus,
    pub occupant: Option<Tile>,
}

/// The board row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardRow {
    squares: [Square; BOARD_LEN],
}

impl Default for BoardRow {
    fn default() -> Self {
        Self::standard()
    }
}

impl BoardRow {
    pub fn new(layout: [Bonus; BOARD_LEN]) -> Self {
        Self {
            squares: std::array::from_fn(|index| Square {
                index,
                bonus: layout[index],
                occupant: None,
            }),
        }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_LAYOUT)
    }

    /// Put a tile on a square, subject to [`check_placement`].
    pub fn place(&mut self, index: usize, tile: Tile) -> Result<(), PlacementError> {
        check_placement(&self.snapshot(), index)?;
        self.squares[index].occupant = Some(tile);
        Ok(())
    }

    /// Lift the tile off a square, if any.
    pub fn remove(&mut self, index: usize) -> Option<Tile> {
        self.squares.get_mut(index)?.occupant.take()
    }

    pub fn snapshot(&self) -> Snapshot {
        std::array::from_fn(|index| self.squares[index].occupant)
    }

    /// Empty every square, returning what was on the board.
    pub fn clear(&mut self) -> Vec<Tile> {
        self.squares
            .iter_mut()
            .filter_map(|square| square.occupant.take())
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.squares.iter().filter(|s| s.occupant.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied_count() == 0
    }

    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    pub fn bonus_at(&self, index: usize) -> Option<Bonus> {
        self.squares.get(index).map(|s| s.bonus)
    }

    pub fn layout(&self) -> [Bonus; BOARD_LEN] {
        std::array::from_fn(|index| self.squares[index].bonus)
    }
}
