//! Legal-effect enumeration.
//!
//! Order is stable: PLACE fronts before backs, REVEAL before ACCUMULATE,
//! and kills in ascending board order.

use smallvec::{smallvec, SmallVec};
use tracing::warn;

use crate::core::{Card, Effect, FamilyId, Kind, Phase, Result, Snapshot, UnsupportedEffectError};

/// Effects list; most positions offer at most four moves.
pub type Effects = SmallVec<[Effect; 4]>;

/// Every legal effect from `state`. Empty only in END.
pub fn legal_effects(state: &Snapshot) -> Result<Effects> {
    match state.phase() {
        Phase::Place => place_effects(state),
        Phase::Reveal => Ok(smallvec![Effect::Reveal, Effect::Accumulate]),
        Phase::Act => {
            let card = state.board().get(state.index())?;
            let mut effects = act_effects(state, card)?;
            if effects.is_empty() {
                effects.push(Effect::None);
            }
            Ok(effects)
        }
        Phase::End => Ok(Effects::new()),
    }
}

fn place_effects(state: &Snapshot) -> Result<Effects> {
    let deck = state.decks().get(FamilyId(state.index() as u8))?;
    let kinds = deck.distinct();
    let back = state.board().len();

    let mut effects: Effects = kinds
        .iter()
        .map(|&kind| Effect::Place { kind, index: 0 })
        .collect();
    if back > 0 {
        effects.extend(kinds.iter().map(|&kind| Effect::Place { kind, index: back }));
    }
    Ok(effects)
}

fn act_effects(state: &Snapshot, card: &Card) -> Result<Effects> {
    let board = state.board();
    let index = state.index();
    let len = board.len();

    let effects: Effects = match card.kind {
        // First or last card of the queue
        Kind::Archer => {
            let mut effects: Effects = smallvec![Effect::Kill { target: 0 }];
            if len > 1 {
                effects.push(Effect::Kill { target: len - 1 });
            }
            effects
        }

        // Inherits only while no other face-up card shares its name
        Kind::Heir => {
            let rival = board
                .iter()
                .enumerate()
                .any(|(i, other)| i != index && other.is_revealed() && other.kind == card.kind);
            if rival {
                smallvec![Effect::None]
            } else {
                smallvec![Effect::Earn { amount: 2 }]
            }
        }

        Kind::Lord => {
            let allies = [board.left_of(index), board.right_of(index)]
                .into_iter()
                .flatten()
                .filter(|n| n.family == card.family)
                .count();
            smallvec![Effect::Earn { amount: 1 + allies as i32 }]
        }

        Kind::Soldier => {
            let mut effects = Effects::new();
            if index > 0 {
                effects.push(Effect::Kill { target: index - 1 });
            }
            if index + 1 < len {
                effects.push(Effect::Kill { target: index + 1 });
            }
            effects
        }

        Kind::Spy => {
            let mut effects = Effects::new();
            for neighbor in [board.left_of(index), board.right_of(index)].into_iter().flatten() {
                let from = neighbor.family;
                if from == card.family || state.scores().get(from)? < 1 {
                    continue;
                }
                let steal = Effect::Steal { from, amount: 1 };
                if !effects.contains(&steal) {
                    effects.push(steal);
                }
            }
            effects
        }

        Kind::Assassination => (0..len)
            .filter(|&i| i != index)
            .map(|target| Effect::Kill { target })
            .collect(),

        // Bonus already paid at reveal
        Kind::Ambush | Kind::Conspiracy => Effects::new(),

        Kind::Shapeshifter => {
            warn!(index, "shapeshifter ability requested");
            return Err(UnsupportedEffectError::Shapeshifter.into());
        }

        Kind::RoyalDecree => {
            warn!(index, "royal decree requested");
            return Err(UnsupportedEffectError::RoyalDecree.into());
        }
    };
    Ok(effects)
}
