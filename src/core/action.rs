//! Actions: an effect plus the position it was generated from.
//!
//! `Effect` is a closed enum with typed operands. `Action` pairs an effect
//! with its source snapshot and memoizes the resulting `GameState`.

use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};

use super::card::Kind;
use super::error::Result;
use super::family::FamilyId;
use super::state::{GameState, Snapshot};
use crate::rules;

/// Payload-free effect tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EffectKind {
    None,
    Place,
    Reveal,
    Accumulate,
    Earn,
    Steal,
    Kill,
    Move,
    Mimic,
}

/// What an action does.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Effect {
    /// Resolve the cursor card without effect.
    None,
    /// Place a face-down `kind` before board position `index`.
    Place { kind: Kind, index: usize },
    /// Turn the cursor card face-up and bank its tokens.
    Reveal,
    /// Leave the cursor card hidden and add a token to it.
    Accumulate,
    /// The cursor card's family gains `amount` tokens.
    Earn { amount: i32 },
    /// The cursor card's family takes `amount` tokens from `from`.
    Steal { from: FamilyId, amount: i32 },
    /// Remove the card at `target`; the killer's family gains a token.
    Kill { target: usize },
    /// Relocate a card (royal decree).
    Move { from: usize, to: usize },
    /// Copy a neighbor's ability (shapeshifter).
    Mimic { source: usize },
}

impl Effect {
    #[must_use]
    pub const fn kind(&self) -> EffectKind {
        match self {
            Effect::None => EffectKind::None,
            Effect::Place { .. } => EffectKind::Place,
            Effect::Reveal => EffectKind::Reveal,
            Effect::Accumulate => EffectKind::Accumulate,
            Effect::Earn { .. } => EffectKind::Earn,
            Effect::Steal { .. } => EffectKind::Steal,
            Effect::Kill { .. } => EffectKind::Kill,
            Effect::Move { .. } => EffectKind::Move,
            Effect::Mimic { .. } => EffectKind::Mimic,
        }
    }

    /// The two integer operands a flat binding would expose.
    ///
    /// Unused operands are zero.
    #[must_use]
    pub fn operands(&self) -> (i64, i64) {
        match *self {
            Effect::None | Effect::Reveal | Effect::Accumulate => (0, 0),
            Effect::Place { kind, index } => (i64::from(kind.index()), index as i64),
            Effect::Earn { amount } => (i64::from(amount), 0),
            Effect::Steal { from, amount } => (from.index() as i64, i64::from(amount)),
            Effect::Kill { target } => (target as i64, 0),
            Effect::Move { from, to } => (from as i64, to as i64),
            Effect::Mimic { source } => (source as i64, 0),
        }
    }
}

/// A legal move out of a state.
///
/// Holds the snapshot it came from (never the `GameState`, which owns the
/// action through its cache) and computes the next state at most once.
#[derive(Clone)]
pub struct Action {
    effect: Effect,
    source: Arc<Snapshot>,
    next: OnceLock<Result<GameState>>,
}

impl Action {
    pub(crate) fn new(effect: Effect, source: Arc<Snapshot>) -> Self {
        Self {
            effect,
            source,
            next: OnceLock::new(),
        }
    }

    #[must_use]
    pub fn effect(&self) -> &Effect {
        &self.effect
    }

    /// Position this action was generated from.
    #[must_use]
    pub fn source(&self) -> &Snapshot {
        &self.source
    }

    /// Resulting state, computed on first use and cached.
    pub fn next_state(&self) -> Result<&GameState> {
        self.next
            .get_or_init(|| rules::apply(&self.source, &self.effect).map(GameState::from_snapshot))
            .as_ref()
            .map_err(Clone::clone)
    }
}

impl std::fmt::Debug for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Action")
            .field("effect", &self.effect)
            .field("phase", &self.source.phase())
            .field("index", &self.source.index())
            .finish()
    }
}
