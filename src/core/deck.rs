//! Per-family pools of kinds not yet placed.

use im::Vector;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::card::Kind;
use super::error::ValidationError;
use super::family::{FamilyId, FamilyMap};

/// Multiset of kinds a family can still place.
///
/// Order is kept as given so action enumeration is reproducible.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Deck {
    kinds: Vector<Kind>,
}

impl Deck {
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = Kind>) -> Self {
        Self { kinds: kinds.into_iter().collect() }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    #[must_use]
    pub fn contains(&self, kind: Kind) -> bool {
        self.kinds.contains(&kind)
    }

    pub fn iter(&self) -> impl Iterator<Item = Kind> + '_ {
        self.kinds.iter().copied()
    }

    /// Distinct kinds in order of first appearance.
    #[must_use]
    pub fn distinct(&self) -> SmallVec<[Kind; 10]> {
        let mut seen = FxHashSet::default();
        self.kinds.iter().copied().filter(|k| seen.insert(*k)).collect()
    }

    /// The deck with one copy of `kind` removed, or `None` if absent.
    #[must_use]
    pub fn without(&self, kind: Kind) -> Option<Self> {
        let position = self.kinds.index_of(&kind)?;
        let mut kinds = self.kinds.clone();
        kinds.remove(position);
        Some(Self { kinds })
    }
}

impl FromIterator<Kind> for Deck {
    fn from_iter<I: IntoIterator<Item = Kind>>(iter: I) -> Self {
        Self::new(iter)
    }
}

/// One deck per family.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Decks {
    decks: FamilyMap<Deck>,
}

impl Decks {
    /// Build from one deck per family (at least two families).
    pub fn new(decks: impl IntoIterator<Item = Deck>) -> Result<Self, ValidationError> {
        Ok(Self { decks: FamilyMap::from_values(decks)? })
    }

    /// Every family gets a copy of the same deck.
    pub fn uniform(family_count: usize, deck: Deck) -> Result<Self, ValidationError> {
        Ok(Self { decks: FamilyMap::with_value(family_count, deck)? })
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.decks.family_count()
    }

    pub fn get(&self, family: FamilyId) -> Result<&Deck, ValidationError> {
        self.decks.get(family)
    }

    pub fn iter(&self) -> impl Iterator<Item = (FamilyId, &Deck)> {
        self.decks.iter()
    }

    /// Cards left across all decks.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.decks.values().map(Deck::len).sum()
    }

    /// Take one `kind` out of `family`'s deck.
    pub fn remove(&self, family: FamilyId, kind: Kind) -> Result<Self, ValidationError> {
        let decks = self.decks.update_with(family, |deck| {
            deck.without(kind).ok_or(ValidationError::MissingKind {
                family: family.index(),
                kind,
            })
        })?;
        Ok(Self { decks })
    }

    /// Checks the per-family size balance.
    ///
    /// Families before `placed` have already placed this round and hold one
    /// card fewer than the rest. `placed == 0` requires all decks equal.
    pub(crate) fn check_balance(&self, placed: usize) -> Result<(), ValidationError> {
        let Some(first) = self.decks.values().next() else {
            return Ok(());
        };
        let full = if placed == 0 { first.len() } else { first.len() + 1 };
        for (family, deck) in self.decks.iter() {
            let expected = if family.index() < placed { full - 1 } else { full };
            if deck.len() != expected {
                return Err(ValidationError::DeckImbalance {
                    family: family.index(),
                    size: deck.len(),
                    expected,
                });
            }
        }
        Ok(())
    }
}
