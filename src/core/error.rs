//! Error types.
//!
//! - `ValidationError`: malformed input or a bounds violation, raised when a
//!   value is built or a collection is edited.
//! - `UnsupportedEffectError`: a rule that is recognized but not finished.
//!
//! Reaching the end of the game is not an error.

use super::state::Phase;

/// Malformed shape, bad index, or broken state invariant.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("index out of range (0 <= {index} < {len})")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("at least {min} families are required, got {count}")]
    TooFewFamilies { count: usize, min: usize },

    #[error("at most {max} families are supported, got {count}")]
    TooManyFamilies { count: usize, max: usize },

    #[error("decks and scores count mismatch ({decks} != {scores})")]
    FamilyCountMismatch { decks: usize, scores: usize },

    #[error("family index out of range (0 <= {family} < {count})")]
    FamilyOutOfRange { family: usize, count: usize },

    #[error("invalid token count {tokens} (must be >= -1)")]
    InvalidTokens { tokens: i32 },

    #[error("token count overflow")]
    TokenOverflow,

    #[error("family {family} has no card to place")]
    EmptyDeck { family: usize },

    #[error("deck of family {family} holds {size} cards, expected {expected}")]
    DeckImbalance { family: usize, size: usize, expected: usize },

    #[error("cursor {index} out of range for {phase:?} phase (bound {bound})")]
    CursorOutOfRange { phase: Phase, index: usize, bound: usize },

    #[error("card at cursor {index} is not valid for {phase:?} phase")]
    CursorCard { phase: Phase, index: usize },

    #[error("deck of family {family} holds no {kind}")]
    MissingKind { family: usize, kind: super::card::Kind },

    #[error("{effect:?} cannot be applied in {phase:?} phase")]
    EffectPhase { effect: super::action::EffectKind, phase: Phase },
}

/// Recognized rule whose resolution is not defined yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, thiserror::Error)]
pub enum UnsupportedEffectError {
    #[error("shapeshifter abilities are not supported")]
    Shapeshifter,

    #[error("royal decree moves are not supported")]
    RoyalDecree,

    #[error("killing a hidden ambush is not supported")]
    AmbushTrap,
}

/// Any failure the engine reports.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("unsupported effect: {0}")]
    Unsupported(#[from] UnsupportedEffectError),
}

/// Engine result alias.
pub type Result<T> = std::result::Result<T, EngineError>;
