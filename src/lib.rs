//! # oriflamme
//!
//! A deterministic rules engine for a hidden-information card game in which
//! rival families play cards face-down into a shared queue, then reveal and
//! resolve them in order.
//!
//! ## Design Principles
//!
//! 1. **Immutable states**: Every edit returns a new value. Persistent
//!    collections from `im-rs` make sibling states cheap to keep around.
//!
//! 2. **Lazy move graph**: A [`GameState`] computes its legal actions at most
//!    once, and each [`Action`] computes its resulting state at most once.
//!
//! 3. **No strategy**: The engine enumerates and applies moves. Picking moves
//!    is the driver's job.
//!
//! ## Modules
//!
//! - `core`: Families, cards, board, decks, scores, state, actions, errors
//! - `rules`: Legal-effect generation and effect application
//! - `setup`: Seeded RNG and initial deal
//! - `explore`: Perft counting and random playouts
//!
//! ## Example
//!
//! ```
//! use oriflamme::{GameSetup, GameRng, random_playout};
//!
//! let start = GameSetup::new().family_count(3).hand_size(4).build(7).unwrap();
//! let playout = random_playout(&start, &mut GameRng::new(1), 1_000).unwrap();
//!
//! assert!(playout.is_complete());
//! ```

pub mod core;
pub mod rules;
pub mod setup;
pub mod explore;

// Re-export commonly used types
pub use crate::core::{
    FamilyId, FamilyMap,
    Card, Kind,
    Board, Deck, Decks, Scores,
    GameConfig, DEFAULT_ROUND_LIMIT, MAX_FAMILIES, MIN_FAMILIES,
    EngineError, Result, UnsupportedEffectError, ValidationError,
    Action, Effect, EffectKind,
    GameState, Phase, Snapshot, StateRecord,
};

pub use crate::rules::{legal_effects, Effects, GameResult};

pub use crate::setup::{GameRng, GameRngState, GameSetup, SUPPORTED_KINDS};

pub use crate::explore::{perft, random_playout, PerftStats, Playout};
