//! Game state: an immutable node of the game tree.
//!
//! ## Snapshot
//!
//! The position itself: phase, board, decks, scores, cursor, round and the
//! shared configuration. Every field is a persistent collection or a small
//! value, so cloning a snapshot is O(1).
//!
//! ## GameState
//!
//! A cheap, thread-safe handle to a snapshot plus its memoized legal
//! actions. Actions point back at the snapshot, never at the `GameState`,
//! so no reference cycle forms between a state and its actions.

use std::ops::Deref;
use std::sync::{Arc, OnceLock};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::action::Action;
use super::board::Board;
use super::card::Card;
use super::config::GameConfig;
use super::deck::Decks;
use super::error::{Result, ValidationError};
use super::family::{check_family_count, FamilyId};
use super::score::Scores;
use crate::rules::{self, GameResult};

/// Stage of the turn structure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// `index` is the family placing a card.
    Place,
    /// `index` is a face-down board position waiting to be revealed or
    /// to accumulate.
    Reveal,
    /// `index` is a face-up board position resolving its ability.
    Act,
    /// Terminal; `index` carries no meaning.
    End,
}

/// Immutable position data.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Snapshot {
    pub(crate) phase: Phase,
    pub(crate) board: Board,
    pub(crate) decks: Decks,
    pub(crate) scores: Scores,
    pub(crate) index: usize,
    pub(crate) round: u32,
    pub(crate) config: Arc<GameConfig>,
}

impl Snapshot {
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[must_use]
    pub fn decks(&self) -> &Decks {
        &self.decks
    }

    #[must_use]
    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    /// Family cursor in PLACE, board cursor in REVEAL and ACT.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Completed resolution passes.
    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.decks.family_count()
    }

    /// Card under the cursor; only defined in REVEAL and ACT.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        match self.phase {
            Phase::Reveal | Phase::Act => self.board.get(self.index).ok(),
            Phase::Place | Phase::End => None,
        }
    }

    /// Family to move: the placing family, or the owner of the cursor card.
    #[must_use]
    pub fn current_family(&self) -> Option<FamilyId> {
        match self.phase {
            Phase::Place => Some(FamilyId(self.index as u8)),
            Phase::Reveal | Phase::Act => self.current_card().map(|c| c.family),
            Phase::End => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase == Phase::End
    }

    /// Final standings; `None` until the game has ended.
    #[must_use]
    pub fn outcome(&self) -> Option<GameResult> {
        if !self.is_finished() {
            return None;
        }
        GameResult::from_leaders(self.scores.leaders())
    }

    /// Check every structural invariant.
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        let families = self.decks.family_count();
        if families != self.scores.family_count() {
            return Err(ValidationError::FamilyCountMismatch {
                decks: families,
                scores: self.scores.family_count(),
            });
        }
        check_family_count(families)?;

        for card in self.board.iter() {
            if card.family.index() >= families {
                return Err(ValidationError::FamilyOutOfRange {
                    family: card.family.index(),
                    count: families,
                });
            }
            if card.tokens < Card::REVEALED {
                return Err(ValidationError::InvalidTokens { tokens: card.tokens });
            }
        }

        let bound = match self.phase {
            Phase::Place => families,
            Phase::Reveal | Phase::Act => self.board.len(),
            Phase::End => usize::MAX,
        };
        if self.index >= bound {
            return Err(ValidationError::CursorOutOfRange {
                phase: self.phase,
                index: self.index,
                bound,
            });
        }

        let placed = if self.phase == Phase::Place { self.index } else { 0 };
        self.decks.check_balance(placed)?;

        // A family about to place must have something to place
        if self.phase == Phase::Place && self.decks.get(FamilyId(self.index as u8))?.is_empty() {
            return Err(ValidationError::EmptyDeck { family: self.index });
        }

        let cursor_ok = match self.phase {
            Phase::Reveal => !self.board.get(self.index)?.is_revealed(),
            Phase::Act => self.board.get(self.index)?.is_revealed(),
            Phase::Place | Phase::End => true,
        };
        if !cursor_ok {
            return Err(ValidationError::CursorCard {
                phase: self.phase,
                index: self.index,
            });
        }
        Ok(())
    }
}

/// Raw, serializable form of a state.
///
/// Converting back into a [`GameState`] re-validates everything.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateRecord {
    pub phase: Phase,
    pub board: Board,
    pub decks: Decks,
    pub scores: Scores,
    pub index: usize,
    #[serde(default)]
    pub round: u32,
    #[serde(default)]
    pub config: GameConfig,
}

struct Node {
    snapshot: Arc<Snapshot>,
    actions: OnceLock<Result<SmallVec<[Action; 4]>>>,
}

/// Immutable game-tree node.
///
/// Cloning shares the node, including its action cache.
///
/// ```
/// use oriflamme::core::{Board, Deck, Decks, GameState, Kind, Phase, Scores};
///
/// let decks = Decks::new([Deck::new([Kind::Archer]), Deck::new([Kind::Soldier])]).unwrap();
/// let scores = Scores::uniform(2, 0).unwrap();
/// let state = GameState::new(Phase::Place, Board::new(), decks, scores, 0).unwrap();
///
/// let actions = state.actions().unwrap();
/// assert_eq!(actions.len(), 1);
///
/// let next = actions[0].next_state().unwrap();
/// assert_eq!(next.phase(), Phase::Place);
/// assert_eq!(next.index(), 1);
/// ```
#[derive(Clone)]
pub struct GameState {
    node: Arc<Node>,
}

impl GameState {
    /// Build a state at round 0 with the default configuration.
    pub fn new(
        phase: Phase,
        board: Board,
        decks: Decks,
        scores: Scores,
        index: usize,
    ) -> std::result::Result<Self, ValidationError> {
        Self::try_from(StateRecord {
            phase,
            board,
            decks,
            scores,
            index,
            round: 0,
            config: GameConfig::default(),
        })
    }

    /// Wrap a snapshot produced by a rule transition.
    pub(crate) fn from_snapshot(snapshot: Snapshot) -> Self {
        debug_assert!(snapshot.validate().is_ok(), "transition broke an invariant");
        Self {
            node: Arc::new(Node {
                snapshot: Arc::new(snapshot),
                actions: OnceLock::new(),
            }),
        }
    }

    /// The shared snapshot behind this state.
    #[must_use]
    pub fn snapshot(&self) -> &Arc<Snapshot> {
        &self.node.snapshot
    }

    /// Legal actions, computed on first use and cached.
    ///
    /// Empty in END. Fails when the cursor card's rule is unsupported; the
    /// failure is cached like a success.
    pub fn actions(&self) -> Result<&[Action]> {
        self.node
            .actions
            .get_or_init(|| {
                let snapshot = &self.node.snapshot;
                let effects = rules::legal_effects(snapshot)?;
                Ok(effects
                    .into_iter()
                    .map(|effect| Action::new(effect, Arc::clone(snapshot)))
                    .collect())
            })
            .as_deref()
            .map_err(Clone::clone)
    }

    /// Raw form of this state.
    #[must_use]
    pub fn to_record(&self) -> StateRecord {
        let s = self.snapshot();
        StateRecord {
            phase: s.phase,
            board: s.board.clone(),
            decks: s.decks.clone(),
            scores: s.scores.clone(),
            index: s.index,
            round: s.round,
            config: GameConfig::clone(&s.config),
        }
    }
}

impl TryFrom<StateRecord> for GameState {
    type Error = ValidationError;

    fn try_from(record: StateRecord) -> std::result::Result<Self, Self::Error> {
        let snapshot = Snapshot {
            phase: record.phase,
            board: record.board,
            decks: record.decks,
            scores: record.scores,
            index: if record.phase == Phase::End { 0 } else { record.index },
            round: record.round,
            config: Arc::new(record.config),
        };
        snapshot.validate()?;
        Ok(Self::from_snapshot(snapshot))
    }
}

impl Deref for GameState {
    type Target = Snapshot;

    fn deref(&self) -> &Snapshot {
        &self.node.snapshot
    }
}

impl PartialEq for GameState {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.node, &other.node) || self.node.snapshot == other.node.snapshot
    }
}

impl Eq for GameState {}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("GameState").field(&self.node.snapshot).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Deck, Kind};

    fn f(id: u8) -> FamilyId {
        FamilyId::new(id)
    }

    fn record(phase: Phase, board: Board, decks: &[&[Kind]], scores: &[i32], index: usize) -> StateRecord {
        StateRecord {
            phase,
            board,
            decks: Decks::new(decks.iter().map(|d| Deck::new(d.iter().copied()))).unwrap(),
            scores: Scores::new(scores.iter().copied()).unwrap(),
            index,
            round: 0,
            config: GameConfig::default(),
        }
    }

    #[test]
    fn test_valid_place_state() {
        let rec = record(Phase::Place, Board::new(), &[&[Kind::Archer], &[Kind::Soldier]], &[0, 0], 0);
        let state = GameState::try_from(rec).unwrap();

        assert_eq!(state.phase(), Phase::Place);
        assert_eq!(state.current_family(), Some(f(0)));
        assert!(state.current_card().is_none());
        assert!(!state.is_finished());
        assert!(state.outcome().is_none());
    }

    #[test]
    fn test_family_count_mismatch() {
        let mut rec = record(Phase::Place, Board::new(), &[&[], &[]], &[0, 0], 0);
        rec.scores = Scores::new([0, 0, 0]).unwrap();

        assert_eq!(
            GameState::try_from(rec),
            Err(ValidationError::FamilyCountMismatch { decks: 2, scores: 3 })
        );
    }

    #[test]
    fn test_place_cursor_bound() {
        let rec = record(Phase::Place, Board::new(), &[&[], &[]], &[0, 0], 2);

        assert_eq!(
            GameState::try_from(rec),
            Err(ValidationError::CursorOutOfRange { phase: Phase::Place, index: 2, bound: 2 })
        );
    }

    #[test]
    fn test_board_cursor_bound() {
        let board: Board = [Card::face_up(Kind::Lord, f(0))].into_iter().collect();
        let rec = record(Phase::Act, board, &[&[], &[]], &[0, 0], 1);

        assert!(matches!(
            GameState::try_from(rec),
            Err(ValidationError::CursorOutOfRange { phase: Phase::Act, .. })
        ));
    }

    #[test]
    fn test_cursor_card_visibility() {
        let board: Board = [Card::hidden(Kind::Lord, f(0))].into_iter().collect();

        let act = record(Phase::Act, board.clone(), &[&[], &[]], &[0, 0], 0);
        assert_eq!(
            GameState::try_from(act),
            Err(ValidationError::CursorCard { phase: Phase::Act, index: 0 })
        );

        let reveal = record(Phase::Reveal, board, &[&[], &[]], &[0, 0], 0);
        assert!(GameState::try_from(reveal).is_ok());
    }

    #[test]
    fn test_deck_balance_in_place() {
        // Family 0 already placed this round
        let board: Board = [Card::hidden(Kind::Lord, f(0))].into_iter().collect();
        let ok = record(Phase::Place, board.clone(), &[&[Kind::Spy], &[Kind::Spy, Kind::Heir]], &[0, 0], 1);
        assert!(GameState::try_from(ok).is_ok());

        let bad = record(Phase::Place, board, &[&[Kind::Spy], &[Kind::Spy, Kind::Heir]], &[0, 0], 0);
        assert!(matches!(GameState::try_from(bad), Err(ValidationError::DeckImbalance { .. })));
    }

    #[test]
    fn test_place_with_empty_deck_rejected() {
        let rec = record(Phase::Place, Board::new(), &[&[], &[]], &[0, 0], 0);
        assert_eq!(GameState::try_from(rec), Err(ValidationError::EmptyDeck { family: 0 }));

        let board: Board = [Card::hidden(Kind::Lord, f(0))].into_iter().collect();
        let rec = record(Phase::Place, board, &[&[], &[Kind::Spy]], &[0, 0], 1);
        assert!(GameState::try_from(rec).is_ok());
    }

    #[test]
    fn test_card_family_range() {
        let board: Board = [Card::face_up(Kind::Lord, f(2))].into_iter().collect();
        let rec = record(Phase::Act, board, &[&[], &[]], &[0, 0], 0);

        assert_eq!(
            GameState::try_from(rec),
            Err(ValidationError::FamilyOutOfRange { family: 2, count: 2 })
        );
    }

    #[test]
    fn test_end_state() {
        let rec = record(Phase::End, Board::new(), &[&[], &[], &[]], &[2, 5, 5], 7);
        let state = GameState::try_from(rec).unwrap();

        assert_eq!(state.index(), 0);
        assert!(state.actions().unwrap().is_empty());
        assert_eq!(state.outcome(), Some(GameResult::Winners(vec![f(1), f(2)])));
    }

    #[test]
    fn test_actions_are_cached() {
        let rec = record(Phase::Place, Board::new(), &[&[Kind::Archer], &[Kind::Soldier]], &[0, 0], 0);
        let state = GameState::try_from(rec).unwrap();

        let first = state.actions().unwrap().as_ptr();
        let second = state.actions().unwrap().as_ptr();
        assert_eq!(first, second);

        // Clones share the cache
        let cloned = state.clone();
        assert_eq!(cloned.actions().unwrap().as_ptr(), first);
    }

    #[test]
    fn test_record_roundtrip() {
        let board: Board = [Card::hidden(Kind::Lord, f(0)), Card::face_up(Kind::Spy, f(1))]
            .into_iter()
            .collect();
        let rec = record(Phase::Reveal, board, &[&[Kind::Heir], &[Kind::Archer]], &[1, 3], 0);
        let state = GameState::try_from(rec.clone()).unwrap();

        assert_eq!(state.to_record(), rec);

        let json = serde_json::to_string(&rec).unwrap();
        let parsed: StateRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(GameState::try_from(parsed).unwrap(), state);
    }

    #[test]
    fn test_state_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GameState>();
        assert_send_sync::<Action>();
    }
}
