//! Game session state: bag, rack, board, scores and the round lifecycle

use super::lookup::{LookupResponse, LookupWorker};
use crate::game::board::{Bonus, BoardRow, PlacementError, Square, BOARD_LEN, STANDARD_LAYOUT};
use crate::game::dictionary::{Dictionary, EmbeddedWordList};
use crate::game::rack::Rack;
use crate::game::validation::ValidationReport;
use crate::game::{scoring, word, DrawPolicy, LetterBag, Tile};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Shown when a refill finds the bag empty
pub const BAG_EMPTY_NOTICE: &str = "No more tiles left in the bag!";

/// Errors from session commands. None of them change session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// The board refused the tile
    Placement(PlacementError),
    /// No tile in that rack slot
    NoTile { slot: usize },
    /// No tile on that square
    EmptySquare { index: usize },
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Placement(e) => write!(f, "{}", e),
            SessionError::NoTile { slot } => write!(f, "no tile in rack slot {}", slot + 1),
            SessionError::EmptySquare { index } => write!(f, "no tile on square {}", index + 1),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Placement(e) => Some(e),
            _ => None,
        }
    }
}

impl From<PlacementError> for SessionError {
    fn from(e: PlacementError) -> Self {
        SessionError::Placement(e)
    }
}

/// Where the round stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Tiles are being placed; the word is not (yet) valid
    Placing,
    /// The word is valid and the player may advance
    RoundComplete,
}

/// Result of topping the rack back up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefillOutcome {
    pub requested: usize,
    pub drawn: usize,
}

impl RefillOutcome {
    /// Fewer tiles came out of the bag than were asked for
    pub fn is_short(&self) -> bool {
        self.drawn < self.requested
    }
}

/// How to build a session
#[derive(Clone)]
pub struct SessionOptions {
    pub layout: [Bonus; BOARD_LEN],
    pub dictionary: Arc<dyn Dictionary>,
    pub draw_policy: DrawPolicy,
    /// Fixed seed for reproducible draws; entropy when unset
    pub seed: Option<u64>,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            layout: STANDARD_LAYOUT,
            dictionary: Arc::new(EmbeddedWordList),
            draw_policy: DrawPolicy::default(),
            seed: None,
        }
    }
}

impl SessionOptions {
    pub fn with_dictionary(dictionary: Arc<dyn Dictionary>) -> Self {
        Self {
            dictionary,
            ..Self::default()
        }
    }
}

/// Everything the presentation layer needs to draw a frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub word: String,
    pub report: ValidationReport,
    pub current_score: u32,
    pub highest_score: u32,
    pub remaining_tiles: u32,
    pub advance_enabled: bool,
    pub lookup_pending: bool,
    pub rack: Vec<Tile>,
    pub squares: Vec<Square>,
    pub notice: Option<String>,
}

/// One player's game: owns the bag, rack and board, and tracks scores
pub struct GameSession {
    bag: LetterBag,
    rack: Rack,
    board: BoardRow,
    rng: StdRng,
    /// Assembled word for the current board
    current_word: String,
    /// Score of the current word (0 unless valid)
    current_score: u32,
    /// Best finalized round score since the last reset
    highest_score: u32,
    report: ValidationReport,
    advance_enabled: bool,
    /// Bumped on every board change; stale lookups carry an older value
    generation: u64,
    lookup_pending: bool,
    lookup: LookupWorker,
    notice: Option<String>,
}

impl GameSession {
    /// Create a session and deal the first rack
    pub fn new(options: SessionOptions) -> Self {
        let rng = match options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut session = Self {
            bag: LetterBag::standard(options.draw_policy),
            rack: Rack::new(),
            board: BoardRow::new(options.layout),
            rng,
            current_word: word::blank(),
            current_score: 0,
            highest_score: 0,
            report: ValidationReport::failed(),
            advance_enabled: false,
            generation: 0,
            lookup_pending: false,
            lookup: LookupWorker::spawn(options.dictionary),
            notice: None,
        };
        session.refill();
        log::info!(
            "session started ({} draw), {} tiles in bag",
            session.bag.policy().label(),
            session.bag.remaining_total()
        );
        session
    }

    /// Move the tile in rack `slot` onto board square `square`.
    /// On error the tile stays on the rack.
    pub fn place(&mut self, square: usize, slot: usize) -> Result<(), SessionError> {
        let tile = self.rack.get(slot).ok_or(SessionError::NoTile { slot })?;
        if let Err(e) = self.board.place(square, tile) {
            log::debug!("rejected {} on square {}: {}", tile.letter, square, e);
            return Err(e.into());
        }
        self.rack.take(slot);
        log::debug!("placed {} on square {}", tile.letter, square);
        self.refresh();
        Ok(())
    }

    /// Move the tile on `square` back to the end of the rack
    pub fn remove(&mut self, square: usize) -> Result<Tile, SessionError> {
        let tile = self
            .board
            .remove(square)
            .ok_or(SessionError::EmptySquare { index: square })?;
        self.rack.add([tile]);
        log::debug!("returned {} from square {} to the rack", tile.letter, square);
        self.refresh();
        Ok(tile)
    }

    /// Recompute the word after a board change and start a dictionary check
    fn refresh(&mut self) {
        self.generation += 1;
        self.current_word = word::assemble(&self.board.snapshot());
        self.report = ValidationReport::structural(&self.current_word);
        self.current_score = 0;
        self.advance_enabled = false;
        self.notice = None;

        if self.board.is_empty() {
            self.lookup_pending = false;
            return;
        }
        self.lookup_pending = self.lookup.submit(self.generation, self.current_word.clone());
        if !self.lookup_pending {
            log::warn!("dictionary worker stopped; treating {} as not found", self.current_word);
        }
    }

    /// Apply any finished dictionary checks without blocking.
    /// Returns true if the displayed state changed.
    pub fn poll(&mut self) -> bool {
        let mut changed = false;
        while let Some(response) = self.lookup.try_recv() {
            changed |= self.apply(response);
        }
        if self.lookup_pending && !self.lookup.is_alive() {
            self.lookup_pending = false;
            changed = true;
        }
        changed
    }

    /// Block until the current dictionary check lands or `timeout` passes.
    /// Returns true if no check is outstanding afterwards.
    pub fn settle(&mut self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while self.lookup_pending {
            let remaining = deadline.saturating_duration_since(Instant::now());
            if remaining.is_zero() {
                break;
            }
            match self.lookup.recv_timeout(remaining) {
                Some(response) => {
                    self.apply(response);
                }
                None => {
                    if !self.lookup.is_alive() {
                        self.lookup_pending = false;
                    }
                    break;
                }
            }
        }
        !self.lookup_pending
    }

    fn apply(&mut self, response: LookupResponse) -> bool {
        if response.generation != self.generation {
            log::debug!(
                "dropping stale lookup #{} for {} (now #{})",
                response.generation,
                response.word,
                self.generation
            );
            return false;
        }

        self.lookup_pending = false;
        self.report = self.report.with_dictionary(response.found);
        if self.report.overall_valid() {
            self.current_score = scoring::score(&self.board);
            self.advance_enabled = true;
            log::debug!("{} is valid for {} points", response.word, self.current_score);
        } else {
            self.current_score = 0;
            self.advance_enabled = false;
        }
        true
    }

    /// Finish the round: bank the score, discard the board and refill the rack
    pub fn next_word(&mut self) -> RefillOutcome {
        if self.current_score > self.highest_score {
            self.highest_score = self.current_score;
        }
        let discarded = self.board.clear();
        log::info!(
            "round finished: {} for {} (best {}), {} tiles discarded",
            self.current_word.trim_end_matches(word::PLACEHOLDER),
            self.current_score,
            self.highest_score,
            discarded.len()
        );
        self.clear_round();
        self.refill()
    }

    /// Start the whole game again from a full bag
    pub fn start_over(&mut self) -> RefillOutcome {
        self.bag.reset();
        self.highest_score = 0;
        self.board.clear();
        self.rack.clear();
        self.clear_round();
        log::info!("game reset, {} tiles in bag", self.bag.remaining_total());
        self.refill()
    }

    fn clear_round(&mut self) {
        // Invalidate any lookup still in flight
        self.generation += 1;
        self.lookup_pending = false;
        self.current_word = word::blank();
        self.current_score = 0;
        self.report = ValidationReport::failed();
        self.advance_enabled = false;
        self.notice = None;
    }

    /// Top the rack up to seven tiles, or as many as the bag still has
    fn refill(&mut self) -> RefillOutcome {
        let requested = self.rack.needed();
        let tiles = self.bag.draw(requested, &mut self.rng);
        let outcome = RefillOutcome {
            requested,
            drawn: tiles.len(),
        };
        self.rack.add(tiles);

        if outcome.is_short() {
            log::warn!(
                "bag ran short: wanted {} tiles, drew {}",
                outcome.requested,
                outcome.drawn
            );
            if outcome.drawn == 0 {
                self.notice = Some(BAG_EMPTY_NOTICE.to_string());
            }
        }
        outcome
    }

    pub fn phase(&self) -> Phase {
        if self.advance_enabled {
            Phase::RoundComplete
        } else {
            Phase::Placing
        }
    }

    pub fn current_word(&self) -> &str {
        &self.current_word
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn highest_score(&self) -> u32 {
        self.highest_score
    }

    pub fn remaining_tiles(&self) -> u32 {
        self.bag.remaining_total()
    }

    pub fn advance_enabled(&self) -> bool {
        self.advance_enabled
    }

    pub fn lookup_pending(&self) -> bool {
        self.lookup_pending
    }

    pub fn report(&self) -> ValidationReport {
        self.report
    }

    pub fn rack(&self) -> &Rack {
        &self.rack
    }

    pub fn board(&self) -> &BoardRow {
        &self.board
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Snapshot of everything the presentation layer renders
    pub fn view(&self) -> SessionView {
        SessionView {
            word: self.current_word.clone(),
            report: self.report,
            current_score: self.current_score,
            highest_score: self.highest_score,
            remaining_tiles: self.remaining_tiles(),
            advance_enabled: self.advance_enabled,
            lookup_pending: self.lookup_pending,
            rack: self.rack.tiles().to_vec(),
            squares: self.board.squares().to_vec(),
            notice: self.notice.clone(),
        }
    }

    #[cfg(test)]
    fn set_rack(&mut self, tiles: &[Tile]) {
        self.rack.clear();
        self.rack.add(tiles.iter().copied());
    }

    #[cfg(test)]
    fn drain_bag(&mut self) {
        let left = self.bag.remaining_total() as usize;
        self.bag.draw(left, &mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::dictionary::{DictionaryError, WordList};
    use crate::game::rack::RACK_SIZE;
    use std::sync::mpsc;
    use std::sync::Mutex;

    const WAIT: Duration = Duration::from_secs(5);

    fn session_with(words: &str) -> GameSession {
        GameSession::new(SessionOptions {
            dictionary: Arc::new(WordList::parse(words)),
            seed: Some(11),
            ..SessionOptions::default()
        })
    }

    fn tiles(pairs: &[(char, u32)]) -> Vec<Tile> {
        pairs.iter().map(|&(c, v)| Tile::new(c, v)).collect()
    }

    /// Place the first rack tile carrying each letter, starting at `start`
    fn spell(session: &mut GameSession, start: usize, letters: &str) {
        for (i, c) in letters.chars().enumerate() {
            let slot = session.rack().position_of(c).unwrap();
            session.place(start + i, slot).unwrap();
        }
    }

    #[test]
    fn test_new_session_deals_full_rack() {
        let session = session_with("cat\n");
        assert_eq!(session.rack().size(), RACK_SIZE);
        assert_eq!(session.remaining_tiles(), 98 - RACK_SIZE as u32);
        assert_eq!(session.current_word(), "------------");
        assert_eq!(session.report(), ValidationReport::failed());
        assert_eq!(session.phase(), Phase::Placing);
    }

    #[test]
    fn test_valid_word_scores_and_enables_advance() {
        let mut session = session_with("cat\n");
        session.set_rack(&tiles(&[('C', 3), ('A', 1), ('T', 1)]));

        // Square 1 is double-letter, square 4 would be double-word
        spell(&mut session, 1, "CAT");
        assert_eq!(session.current_word(), "CAT---------");
        assert!(session.settle(WAIT));

        assert!(session.report().overall_valid());
        assert_eq!(session.current_score(), 3 * 2 + 1 + 1);
        assert!(session.advance_enabled());
        assert_eq!(session.phase(), Phase::RoundComplete);
    }

    #[test]
    fn test_invalid_word_scores_zero() {
        let mut session = session_with("cat\n");
        session.set_rack(&tiles(&[('C', 3), ('A', 1), ('B', 3)]));

        spell(&mut session, 0, "CAB");
        assert!(session.settle(WAIT));

        let report = session.report();
        assert!(report.no_gaps && report.min_length);
        assert!(!report.in_dictionary);
        assert_eq!(session.current_score(), 0);
        assert!(!session.advance_enabled());
    }

    #[test]
    fn test_rejected_placement_keeps_tile_on_rack() {
        let mut session = session_with("cat\n");
        session.set_rack(&tiles(&[('C', 3), ('A', 1)]));
        session.place(0, 0).unwrap();

        let err = session.place(5, 0).unwrap_err();
        assert_eq!(
            err,
            SessionError::Placement(PlacementError::NonAdjacentPlacement { index: 5 })
        );
        assert_eq!(session.rack().letters(), vec!['A']);

        let err = session.place(0, 0).unwrap_err();
        assert_eq!(
            err,
            SessionError::Placement(PlacementError::OccupiedSquare { index: 0 })
        );
        assert_eq!(session.rack().letters(), vec!['A']);

        assert_eq!(session.place(1, 3), Err(SessionError::NoTile { slot: 3 }));
    }

    #[test]
    fn test_remove_returns_tile_and_revalidates() {
        let mut session = session_with("at\n");
        session.set_rack(&tiles(&[('A', 1), ('T', 1), ('S', 1)]));
        spell(&mut session, 2, "ATS");
        assert!(session.settle(WAIT));
        assert!(!session.advance_enabled());

        // S sat on the double-word square; AT is left on plain squares
        assert_eq!(session.remove(4), Ok(Tile::new('S', 1)));
        assert_eq!(session.rack().letters(), vec!['S']);
        assert!(session.settle(WAIT));
        assert!(session.advance_enabled());
        assert_eq!(session.current_score(), 2);

        assert_eq!(session.remove(4), Err(SessionError::EmptySquare { index: 4 }));
    }

    #[test]
    fn test_gap_after_removal_is_invalid() {
        let mut session = session_with("cat\nct\n");
        session.set_rack(&tiles(&[('C', 3), ('A', 1), ('T', 1)]));
        spell(&mut session, 0, "CAT");
        session.remove(1).unwrap();

        assert_eq!(session.current_word(), "C-T---------");
        assert!(session.settle(WAIT));
        assert!(!session.report().no_gaps);
        assert!(session.report().in_dictionary);
        assert_eq!(session.current_score(), 0);
        assert!(!session.advance_enabled());
    }

    #[test]
    fn test_next_word_banks_highest_score() {
        let mut session = session_with("cat\nat\n");
        session.set_rack(&tiles(&[('C', 3), ('A', 1), ('T', 1)]));
        spell(&mut session, 1, "CAT");
        session.settle(WAIT);
        let score = session.current_score();

        let outcome = session.next_word();
        assert_eq!(session.highest_score(), score);
        assert_eq!(outcome, RefillOutcome { requested: 7, drawn: 7 });
        assert!(session.board().is_empty());
        assert_eq!(session.current_word(), "------------");
        assert_eq!(session.current_score(), 0);
        assert_eq!(session.report(), ValidationReport::failed());
        assert!(!session.advance_enabled());

        // A lower round never lowers the record
        session.set_rack(&tiles(&[('A', 1), ('T', 1)]));
        spell(&mut session, 5, "AT");
        session.settle(WAIT);
        assert_eq!(session.current_score(), 2);
        session.next_word();
        assert_eq!(session.highest_score(), score);
    }

    #[test]
    fn test_next_word_keeps_unplayed_tiles() {
        let mut session = session_with("at\n");
        session.set_rack(&tiles(&[('A', 1), ('T', 1), ('Q', 10)]));
        spell(&mut session, 0, "AT");
        session.settle(WAIT);

        let outcome = session.next_word();
        assert_eq!(outcome.requested, 6);
        assert_eq!(session.rack().tiles()[0], Tile::new('Q', 10));
        assert_eq!(session.rack().size(), RACK_SIZE);
    }

    #[test]
    fn test_start_over_resets_everything() {
        let mut session = session_with("cat\n");
        session.set_rack(&tiles(&[('C', 3), ('A', 1), ('T', 1)]));
        spell(&mut session, 0, "CAT");
        session.settle(WAIT);
        session.next_word();
        assert!(session.highest_score() > 0);

        session.place(0, 0).unwrap();
        session.start_over();

        assert_eq!(session.highest_score(), 0);
        assert_eq!(session.current_score(), 0);
        assert_eq!(session.current_word(), "------------");
        assert!(session.board().is_empty());
        assert_eq!(session.rack().size(), RACK_SIZE);
        assert_eq!(session.remaining_tiles(), 98 - RACK_SIZE as u32);
        assert!(!session.advance_enabled());
    }

    #[test]
    fn test_empty_bag_refill_is_reported_not_fatal() {
        let mut session = session_with("at\n");
        session.drain_bag();
        session.set_rack(&tiles(&[('A', 1), ('T', 1), ('E', 1)]));

        for _ in 0..3 {
            let outcome = session.next_word();
            assert!(outcome.is_short());
            assert_eq!(outcome.drawn, 0);
            assert_eq!(session.notice(), Some(BAG_EMPTY_NOTICE));
        }
        assert_eq!(session.rack().size(), 3);

        spell(&mut session, 0, "AT");
        session.settle(WAIT);
        assert!(session.advance_enabled());
        session.next_word();
        assert_eq!(session.rack().letters(), vec!['E']);
        assert_eq!(session.remaining_tiles(), 0);
    }

    #[test]
    fn test_partial_refill() {
        let mut session = session_with("at\n");
        session.drain_bag();
        session.bag = LetterBag::with_distribution(
            vec![crate::game::BagEntry {
                letter: 'E',
                value: 1,
                remaining: 2,
            }],
            DrawPolicy::Weighted,
        );
        session.set_rack(&[]);

        let outcome = session.next_word();
        assert_eq!(outcome, RefillOutcome { requested: 7, drawn: 2 });
        assert_eq!(session.rack().letters(), vec!['E', 'E']);
        assert_eq!(session.notice(), None);
    }

    /// Dictionary that answers only when the test says so
    struct Gated {
        words: WordList,
        gate: Mutex<mpsc::Receiver<()>>,
    }

    impl Dictionary for Gated {
        fn lookup(&self, word: &str) -> Result<bool, DictionaryError> {
            let _ = self.gate.lock().unwrap().recv();
            Ok(self.words.contains(word))
        }
    }

    #[test]
    fn test_stale_lookup_is_discarded() {
        let (release, gate) = mpsc::channel();
        let mut session = GameSession::new(SessionOptions {
            dictionary: Arc::new(Gated {
                words: WordList::parse("at\n"),
                gate: Mutex::new(gate),
            }),
            seed: Some(5),
            ..SessionOptions::default()
        });
        session.set_rack(&tiles(&[('A', 1), ('T', 1), ('S', 1)]));

        // "AT" is valid, but "ATS" supersedes it before the answer lands
        spell(&mut session, 0, "AT");
        spell(&mut session, 2, "S");
        for _ in 0..3 {
            let _ = release.send(());
        }

        assert!(session.settle(WAIT));
        assert_eq!(session.current_word(), "ATS---------");
        assert!(!session.report().in_dictionary);
        assert!(!session.advance_enabled());
        assert_eq!(session.current_score(), 0);
    }

    #[test]
    fn test_lookup_after_next_word_is_ignored() {
        let (release, gate) = mpsc::channel();
        let mut session = GameSession::new(SessionOptions {
            dictionary: Arc::new(Gated {
                words: WordList::parse("at\n"),
                gate: Mutex::new(gate),
            }),
            seed: Some(5),
            ..SessionOptions::default()
        });
        session.set_rack(&tiles(&[('A', 1), ('T', 1)]));
        spell(&mut session, 0, "AT");
        session.next_word();

        release.send(()).unwrap();
        release.send(()).unwrap();
        std::thread::sleep(Duration::from_millis(200));
        session.poll();

        assert_eq!(session.report(), ValidationReport::failed());
        assert!(!session.advance_enabled());
        assert_eq!(session.highest_score(), 0);
    }

    #[test]
    fn test_view_mirrors_session() {
        let session = session_with("cat\n");
        let view = session.view();
        assert_eq!(view.word, "------------");
        assert_eq!(view.rack.len(), RACK_SIZE);
        assert_eq!(view.squares.len(), BOARD_LEN);
        assert_eq!(view.remaining_tiles, 91);
        assert!(!view.advance_enabled);
        assert!(!view.lookup_pending);
    }

    #[test]
    fn test_seeded_sessions_deal_the_same_rack() {
        let a = session_with("");
        let b = session_with("");
        assert_eq!(a.rack(), b.rack());
    }
}
