//! Seeded initial deal.

use crate::core::{Board, Deck, Decks, GameConfig, GameState, Kind, Phase, Scores, StateRecord, ValidationError};

use super::rng::GameRng;

/// Kinds whose rules are complete.
pub const SUPPORTED_KINDS: [Kind; 7] = [
    Kind::Archer,
    Kind::Heir,
    Kind::Lord,
    Kind::Soldier,
    Kind::Spy,
    Kind::Assassination,
    Kind::Conspiracy,
];

/// Builder for an opening position.
///
/// Every family receives the same starting deck: `hand_size` kinds drawn
/// without replacement from the pool, sorted.
///
/// ```
/// use oriflamme::core::Phase;
/// use oriflamme::setup::GameSetup;
///
/// let state = GameSetup::new().family_count(3).hand_size(5).build(42).unwrap();
///
/// assert_eq!(state.phase(), Phase::Place);
/// assert_eq!(state.family_count(), 3);
/// assert_eq!(state.decks().total_len(), 15);
/// ```
#[derive(Clone, Debug)]
pub struct GameSetup {
    family_count: usize,
    hand_size: usize,
    pool: Vec<Kind>,
    starting_score: i32,
    config: GameConfig,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            family_count: 4,
            hand_size: 7,
            pool: SUPPORTED_KINDS.to_vec(),
            starting_score: 1,
            config: GameConfig::default(),
        }
    }
}

impl GameSetup {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn family_count(mut self, count: usize) -> Self {
        self.family_count = count;
        self
    }

    /// Cards per family; capped at the pool size when dealing.
    #[must_use]
    pub fn hand_size(mut self, size: usize) -> Self {
        self.hand_size = size;
        self
    }

    /// Kinds to deal from. Duplicates are allowed.
    #[must_use]
    pub fn pool(mut self, kinds: impl IntoIterator<Item = Kind>) -> Self {
        self.pool = kinds.into_iter().collect();
        self
    }

    #[must_use]
    pub fn starting_score(mut self, score: i32) -> Self {
        self.starting_score = score;
        self
    }

    #[must_use]
    pub fn config(mut self, config: GameConfig) -> Self {
        self.config = config;
        self
    }

    /// Deal and return the first PLACE state.
    pub fn build(self, seed: u64) -> Result<GameState, ValidationError> {
        let mut rng = GameRng::new(seed).for_context("deal");
        let mut kinds = self.pool;
        rng.shuffle(&mut kinds);
        kinds.truncate(self.hand_size);
        kinds.sort_unstable();

        tracing::debug!(families = self.family_count, ?kinds, seed, "dealing");
        GameState::try_from(StateRecord {
            phase: Phase::Place,
            board: Board::new(),
            decks: Decks::uniform(self.family_count, Deck::new(kinds))?,
            scores: Scores::uniform(self.family_count, self.starting_score)?,
            index: 0,
            round: 0,
            config: self.config,
        })
    }
}
