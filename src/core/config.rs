//! Game configuration.
//!
//! Rules that vary between table setups live here rather than in the state
//! itself. Every state carries its configuration through a shared `Arc`.

use serde::{Deserialize, Serialize};

/// Fewest families a game can have.
pub const MIN_FAMILIES: usize = 2;

/// Most families a game can have (`FamilyId` is a `u8`).
pub const MAX_FAMILIES: usize = 255;

/// Six resolution passes, as in the printed rules.
pub const DEFAULT_ROUND_LIMIT: u32 = 6;

/// Configuration shared by every state of one game.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameConfig {
    /// Completed rounds after which the game ends. `None` plays until the
    /// decks run out.
    pub round_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_limit: Some(DEFAULT_ROUND_LIMIT),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round limit.
    #[must_use]
    pub fn with_round_limit(mut self, rounds: u32) -> Self {
        self.round_limit = Some(rounds);
        self
    }

    /// Play until no family has a card left to place.
    #[must_use]
    pub fn unlimited(mut self) -> Self {
        self.round_limit = None;
        self
    }

    /// Check whether `completed` rounds end the game.
    #[must_use]
    pub fn is_last_round(&self, completed: u32) -> bool {
        self.round_limit.is_some_and(|limit| completed >= limit)
    }
}
