//! Final standings.

use serde::{Deserialize, Serialize};

use crate::core::FamilyId;

/// Result of a completed game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    /// Single family with the highest score.
    Winner(FamilyId),
    /// Several families tied on the highest score.
    Winners(Vec<FamilyId>),
}

impl GameResult {
    /// Build from the families holding the top score.
    #[must_use]
    pub fn from_leaders(leaders: Vec<FamilyId>) -> Option<Self> {
        match leaders.as_slice() {
            [] => None,
            [only] => Some(GameResult::Winner(*only)),
            _ => Some(GameResult::Winners(leaders)),
        }
    }

    /// Check if a family won (alone or tied).
    #[must_use]
    pub fn is_winner(&self, family: FamilyId) -> bool {
        match self {
            GameResult::Winner(f) => *f == family,
            GameResult::Winners(fs) => fs.contains(&family),
        }
    }
}
