//! The player's rack of held tiles

use super::Tile;

/// Nominal number of tiles on a full rack.
pub const RACK_SIZE: usize = 7;

/// Ordered tiles held by the player. Not capped; refills aim for [`RACK_SIZE`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rack {
    tiles: Vec<Tile>,
}

impl Rack {
    pub fn new() -> Self {
        Self {
            tiles: Vec::with_capacity(RACK_SIZE),
        }
    }

    /// Append tiles to the end of the rack.
    pub fn add<I: IntoIterator<Item = Tile>>(&mut self, tiles: I) {
        self.tiles.extend(tiles);
    }

    /// Tile at a rack slot, without removing it.
    pub fn get(&self, slot: usize) -> Option<Tile> {
        self.tiles.get(slot).copied()
    }

    /// Remove and return the tile at a rack slot.
    pub fn take(&mut self, slot: usize) -> Option<Tile> {
        if slot < self.tiles.len() {
            Some(self.tiles.remove(slot))
        } else {
            None
        }
    }

    /// Remove the first tile equal to `tile`. No-op if there is none.
    pub fn remove_tile(&mut self, tile: &Tile) -> Option<Tile> {
        let pos = self.tiles.iter().position(|t| t == tile)?;
        Some(self.tiles.remove(pos))
    }

    /// Slot of the first tile carrying `letter` (case-insensitive).
    pub fn position_of(&self, letter: char) -> Option<usize> {
        let letter = letter.to_ascii_uppercase();
        self.tiles.iter().position(|t| t.letter == letter)
    }

    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// How many tiles bring the rack back up to [`RACK_SIZE`].
    pub fn needed(&self) -> usize {
        RACK_SIZE.saturating_sub(self.tiles.len())
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn letters(&self) -> Vec<char> {
        self.tiles.iter().map(|t| t.letter).collect()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}
