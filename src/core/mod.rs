//! Core engine types: families, cards, persistent collections, state, actions.
//!
//! Everything here is an immutable value. Edits return new values that share
//! structure with the old ones, so tree-search drivers can keep any number
//! of sibling states alive at O(1) cost each.

pub mod family;
pub mod card;
pub mod board;
pub mod deck;
pub mod score;
pub mod config;
pub mod error;
pub mod action;
pub mod state;

pub use family::{FamilyId, FamilyMap};
pub use card::{Card, Kind};
pub use board::Board;
pub use deck::{Deck, Decks};
pub use score::Scores;
pub use config::{GameConfig, DEFAULT_ROUND_LIMIT, MAX_FAMILIES, MIN_FAMILIES};
pub use error::{EngineError, Result, UnsupportedEffectError, ValidationError};
pub use action::{Action, Effect, EffectKind};
pub use state::{GameState, Phase, Snapshot, StateRecord};
