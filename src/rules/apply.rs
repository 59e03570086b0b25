//! State transitions.
//!
//! `apply` never touches its input: every edit goes through the persistent
//! collections and the result is a fresh snapshot.

use tracing::{debug, trace, warn};

use crate::core::{
    Board, Card, Effect, FamilyId, Kind, Phase, Result, Scores, Snapshot,
    UnsupportedEffectError, ValidationError,
};

/// Apply `effect` to `state` and return the resulting position.
///
/// `effect` is expected to come from `legal_effects(state)`.
pub(crate) fn apply(state: &Snapshot, effect: &Effect) -> Result<Snapshot> {
    trace!(?effect, phase = ?state.phase, index = state.index, "applying effect");
    check_phase(state, effect)?;

    match *effect {
        Effect::Place { kind, index } => place(state, kind, index),

        Effect::Reveal => {
            let card = cursor_card(state)?;
            let scores = state.scores.add(card.family, card.reveal_payout()?)?;
            let board = state.board.set(state.index, card.reveal())?;
            // Same position, now face-up, resolves next
            Ok(Snapshot {
                phase: Phase::Act,
                board,
                scores,
                ..state.clone()
            })
        }

        Effect::Accumulate => {
            let card = cursor_card(state)?;
            let board = state.board.set(state.index, card.accumulate()?)?;
            Ok(advance(state, board, state.scores.clone(), state.index + 1))
        }

        Effect::None => Ok(advance(
            state,
            state.board.clone(),
            state.scores.clone(),
            state.index + 1,
        )),

        Effect::Earn { amount } => {
            let card = cursor_card(state)?;
            let scores = state.scores.add(card.family, amount)?;
            Ok(advance(state, state.board.clone(), scores, state.index + 1))
        }

        Effect::Steal { from, amount } => {
            let card = cursor_card(state)?;
            let scores = state.scores.transfer(from, card.family, amount)?;
            Ok(advance(state, state.board.clone(), scores, state.index + 1))
        }

        Effect::Kill { target } => kill(state, target),

        Effect::Move { .. } => {
            warn!(index = state.index, "royal decree move applied");
            Err(UnsupportedEffectError::RoyalDecree.into())
        }

        Effect::Mimic { .. } => {
            warn!(index = state.index, "shapeshifter mimic applied");
            Err(UnsupportedEffectError::Shapeshifter.into())
        }
    }
}

fn check_phase(state: &Snapshot, effect: &Effect) -> Result<()> {
    let allowed = match effect {
        Effect::Place { .. } => state.phase == Phase::Place,
        Effect::Reveal | Effect::Accumulate => state.phase == Phase::Reveal,
        Effect::None
        | Effect::Earn { .. }
        | Effect::Steal { .. }
        | Effect::Kill { .. }
        | Effect::Move { .. }
        | Effect::Mimic { .. } => state.phase == Phase::Act,
    };
    if allowed {
        Ok(())
    } else {
        Err(ValidationError::EffectPhase {
            effect: effect.kind(),
            phase: state.phase,
        }
        .into())
    }
}

fn cursor_card(state: &Snapshot) -> Result<Card> {
    Ok(*state.board.get(state.index)?)
}

fn place(state: &Snapshot, kind: Kind, index: usize) -> Result<Snapshot> {
    let family = FamilyId(state.index as u8);
    let decks = state.decks.remove(family, kind)?;
    let board = state.board.insert(index, Card::hidden(kind, family))?;

    let next_family = state.index + 1;
    if next_family < state.family_count() {
        return Ok(Snapshot {
            board,
            decks,
            index: next_family,
            ..state.clone()
        });
    }

    debug!(cards = board.len(), "placement complete, resolving queue");
    let placed = Snapshot { board, decks, ..state.clone() };
    Ok(enter(&placed, placed.board.clone(), placed.scores.clone(), 0))
}

fn kill(state: &Snapshot, target: usize) -> Result<Snapshot> {
    let killer = cursor_card(state)?;
    let victim = state.board.get(target)?;
    if victim.kind == Kind::Ambush && !victim.is_revealed() {
        warn!(target, "kill hit a hidden ambush");
        return Err(UnsupportedEffectError::AmbushTrap.into());
    }

    let scores = state.scores.add(killer.family, 1)?;
    let board = state.board.remove(target)?;

    // Removing at or before the cursor slides the next card into place
    let next = if target <= state.index { state.index } else { state.index + 1 };
    Ok(advance(state, board, scores, next))
}

/// Move the cursor to `next` after a card finished resolving.
fn advance(state: &Snapshot, board: Board, scores: Scores, next: usize) -> Snapshot {
    if next >= board.len() {
        return finish_round(state, board, scores);
    }
    enter(state, board, scores, next)
}

/// Point the cursor at board position `index`, which must exist.
fn enter(state: &Snapshot, board: Board, scores: Scores, index: usize) -> Snapshot {
    let phase = match board.get(index) {
        Ok(card) if card.is_revealed() => Phase::Act,
        _ => Phase::Reveal,
    };
    Snapshot {
        phase,
        board,
        scores,
        index,
        ..state.clone()
    }
}

fn finish_round(state: &Snapshot, board: Board, scores: Scores) -> Snapshot {
    let round = state.round + 1;
    let exhausted = state.decks.iter().next().map_or(true, |(_, deck)| deck.is_empty());
    let phase = if exhausted || state.config.is_last_round(round) {
        debug!(round, "game over");
        Phase::End
    } else {
        debug!(round, "round complete");
        Phase::Place
    };
    Snapshot {
        phase,
        board,
        scores,
        index: 0,
        round,
        ..state.clone()
    }
}
