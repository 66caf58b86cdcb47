//! Game logic: tiles, the letter bag, rack, board row, word assembly,
//! validation and scoring

pub mod board;
pub mod dictionary;
pub mod rack;
pub mod scoring;
pub mod validation;
pub mod word;

use rand::distr::weighted::WeightedIndex;
use rand::prelude::*;

/// Standard English tile distribution without blanks: (letter, value, count).
/// 98 tiles in total.
pub const STANDARD_DISTRIBUTION: [(char, u32, u32); 26] = [
    ('A', 1, 9),
    ('B', 3, 2),
    ('C', 3, 2),
    ('D', 2, 4),
    ('E', 1, 12),
    ('F', 4, 2),
    ('G', 2, 3),
    ('H', 4, 2),
    ('I', 1, 9),
    ('J', 8, 1),
    ('K', 5, 1),
    ('L', 1, 4),
    ('M', 3, 2),
    ('N', 1, 6),
    ('O', 1, 8),
    ('P', 3, 2),
    ('Q', 10, 1),
    ('R', 1, 6),
    ('S', 1, 4),
    ('T', 1, 6),
    ('U', 1, 4),
    ('V', 4, 2),
    ('W', 4, 2),
    ('X', 8, 1),
    ('Y', 4, 2),
    ('Z', 10, 1),
];

/// A lettered tile. Immutable once drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tile {
    pub letter: char,
    pub value: u32,
}

impl Tile {
    pub fn new(letter: char, value: u32) -> Self {
        Self { letter, value }
    }
}

/// One letter's slot in the bag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BagEntry {
    pub letter: char,
    pub value: u32,
    pub remaining: u32,
}

/// How the bag picks the next letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawPolicy {
    /// Pick a letter slot uniformly among all letters, retry if it is empty.
    /// Letters with few tiles left come up as often as common ones.
    UniformRetry,
    /// Pick proportionally to the tiles left for each letter.
    #[default]
    Weighted,
}

impl DrawPolicy {
    /// Parse a policy name (`uniform` or `weighted`, case-insensitive).
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "uniform" | "uniform-retry" => Some(DrawPolicy::UniformRetry),
            "weighted" => Some(DrawPolicy::Weighted),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DrawPolicy::UniformRetry => "uniform",
            DrawPolicy::Weighted => "weighted",
        }
    }
}

/// The finite pool of undrawn tiles, grouped by letter.
#[derive(Debug, Clone)]
pub struct LetterBag {
    initial: Vec<BagEntry>,
    entries: Vec<BagEntry>,
    policy: DrawPolicy,
}

impl LetterBag {
    /// The standard 98-tile bag.
    pub fn standard(policy: DrawPolicy) -> Self {
        let entries = STANDARD_DISTRIBUTION
            .iter()
            .map(|&(letter, value, remaining)| BagEntry {
                letter,
                value,
                remaining,
            })
            .collect();
        Self::with_distribution(entries, policy)
    }

    /// A bag filled from an arbitrary distribution.
    pub fn with_distribution(entries: Vec<BagEntry>, policy: DrawPolicy) -> Self {
        Self {
            initial: entries.clone(),
            entries,
            policy,
        }
    }

    /// Draw up to `n` tiles. Returns fewer when the bag runs dry.
    pub fn draw<R: Rng + ?Sized>(&mut self, n: usize, rng: &mut R) -> Vec<Tile> {
        let mut tiles = Vec::with_capacity(n.min(self.remaining_total() as usize));
        while tiles.len() < n {
            let Some(slot) = self.pick_slot(rng) else {
                break;
            };
            let entry = &mut self.entries[slot];
            entry.remaining -= 1;
            tiles.push(Tile::new(entry.letter, entry.value));
        }
        tiles
    }

    fn pick_slot<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<usize> {
        if self.remaining_total() == 0 {
            return None;
        }
        match self.policy {
            DrawPolicy::UniformRetry => loop {
                let slot = rng.random_range(0..self.entries.len());
                if self.entries[slot].remaining > 0 {
                    return Some(slot);
                }
            },
            DrawPolicy::Weighted => {
                let weights = self.entries.iter().map(|entry| entry.remaining);
                WeightedIndex::<u32>::new(weights)
                    .ok()
                    .map(|dist| dist.sample(rng))
            }
        }
    }

    /// Tiles not yet drawn.
    pub fn remaining_total(&self) -> u32 {
        self.entries.iter().map(|entry| entry.remaining).sum()
    }

    /// Size of the distribution the bag was filled from.
    pub fn initial_total(&self) -> u32 {
        self.initial.iter().map(|entry| entry.remaining).sum()
    }

    /// Refill the bag to the distribution it started with.
    pub fn reset(&mut self) {
        self.entries.clone_from(&self.initial);
    }

    pub fn entries(&self) -> &[BagEntry] {
        &self.entries
    }

    pub fn policy(&self) -> DrawPolicy {
        self.policy
    }
}
