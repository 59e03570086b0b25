//! Banked tokens (victory points) per family.

use serde::{Deserialize, Serialize};

use super::error::ValidationError;
use super::family::{FamilyId, FamilyMap};

/// Persistent per-family scores.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scores {
    scores: FamilyMap<i32>,
}

impl Scores {
    /// Build from one score per family (at least two families).
    pub fn new(scores: impl IntoIterator<Item = i32>) -> Result<Self, ValidationError> {
        Ok(Self { scores: FamilyMap::from_values(scores)? })
    }

    /// Every family starts with `value`.
    pub fn uniform(family_count: usize, value: i32) -> Result<Self, ValidationError> {
        Ok(Self { scores: FamilyMap::with_value(family_count, value)? })
    }

    #[must_use]
    pub fn family_count(&self) -> usize {
        self.scores.family_count()
    }

    pub fn get(&self, family: FamilyId) -> Result<i32, ValidationError> {
        self.scores.get(family).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FamilyId, i32)> + '_ {
        self.scores.iter().map(|(f, s)| (f, *s))
    }

    /// Add `delta` to `family`. A zero delta returns the same scores.
    pub fn add(&self, family: FamilyId, delta: i32) -> Result<Self, ValidationError> {
        let current = self.get(family)?;
        if delta == 0 {
            return Ok(self.clone());
        }
        let score = current.checked_add(delta).ok_or(ValidationError::TokenOverflow)?;
        Ok(Self { scores: self.scores.set(family, score)? })
    }

    /// Move `amount` from `source` to `target` as one update.
    pub fn transfer(&self, source: FamilyId, target: FamilyId, amount: i32) -> Result<Self, ValidationError> {
        let from = self.get(source)?;
        let to = self.get(target)?;
        if amount == 0 || source == target {
            return Ok(self.clone());
        }
        let (Some(from), Some(to)) = (from.checked_sub(amount), to.checked_add(amount)) else {
            return Err(ValidationError::TokenOverflow);
        };
        let scores = self.scores.set(source, from)?.set(target, to)?;
        Ok(Self { scores })
    }

    /// Families holding the highest score.
    #[must_use]
    pub fn leaders(&self) -> Vec<FamilyId> {
        let Some(best) = self.scores.values().copied().max() else {
            return Vec::new();
        };
        self.iter().filter(|&(_, s)| s == best).map(|(f, _)| f).collect()
    }
}
