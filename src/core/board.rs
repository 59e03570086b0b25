//! The shared play queue.
//!
//! Position 0 is the front of the queue (resolved first). Every edit takes
//! `&self` and returns a new `Board`; indices are checked before anything is
//! built, so a failed edit never yields a partial board.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use super::error::ValidationError;

/// Persistent ordered sequence of cards.
///
/// ```
/// use oriflamme::core::{Board, Card, FamilyId, Kind};
///
/// let board = Board::new();
/// let board = board.insert(0, Card::hidden(Kind::Lord, FamilyId::new(0))).unwrap();
/// let board = board.insert(1, Card::hidden(Kind::Spy, FamilyId::new(1))).unwrap();
///
/// assert_eq!(board.len(), 2);
/// assert_eq!(board.get(1).unwrap().kind, Kind::Spy);
/// assert!(board.remove(2).is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cards: Vector<Card>,
}

impl Board {
    /// Create an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Card at `index`.
    pub fn get(&self, index: usize) -> Result<&Card, ValidationError> {
        self.cards.get(index).ok_or(ValidationError::IndexOutOfRange {
            index,
            len: self.cards.len(),
        })
    }

    /// Card left of `index`, if any.
    #[must_use]
    pub fn left_of(&self, index: usize) -> Option<&Card> {
        index.checked_sub(1).and_then(|i| self.cards.get(i))
    }

    /// Card right of `index`, if any.
    #[must_use]
    pub fn right_of(&self, index: usize) -> Option<&Card> {
        self.cards.get(index + 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Replace the card at `index`.
    pub fn set(&self, index: usize, card: Card) -> Result<Self, ValidationError> {
        self.check(index)?;
        Ok(Self { cards: self.cards.update(index, card) })
    }

    /// Insert a card before position `index` (`index == len` appends).
    pub fn insert(&self, index: usize, card: Card) -> Result<Self, ValidationError> {
        if index > self.cards.len() {
            return Err(ValidationError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            });
        }
        let mut cards = self.cards.clone();
        cards.insert(index, card);
        Ok(Self { cards })
    }

    /// Remove the card at `index`.
    pub fn remove(&self, index: usize) -> Result<Self, ValidationError> {
        self.check(index)?;
        let mut cards = self.cards.clone();
        cards.remove(index);
        Ok(Self { cards })
    }

    /// Remove the cards at two positions; equal positions remove one card.
    pub fn remove_pair(&self, first: usize, second: usize) -> Result<Self, ValidationError> {
        if first == second {
            return self.remove(first);
        }
        self.check(first)?;
        self.check(second)?;

        // Remove the higher position first so the lower one does not shift
        let (low, high) = if first < second { (first, second) } else { (second, first) };
        let mut cards = self.cards.clone();
        cards.remove(high);
        cards.remove(low);
        Ok(Self { cards })
    }

    /// Exchange the cards at two positions. Swapping a position with itself
    /// returns the board unchanged.
    pub fn swap(&self, first: usize, second: usize) -> Result<Self, ValidationError> {
        self.check(first)?;
        self.check(second)?;
        if first == second {
            return Ok(self.clone());
        }
        let mut cards = self.cards.clone();
        cards.swap(first, second);
        Ok(Self { cards })
    }

    fn check(&self, index: usize) -> Result<(), ValidationError> {
        if index < self.cards.len() {
            Ok(())
        } else {
            Err(ValidationError::IndexOutOfRange {
                index,
                len: self.cards.len(),
            })
        }
    }
}

impl FromIterator<Card> for Board {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self { cards: iter.into_iter().collect() }
    }
}
