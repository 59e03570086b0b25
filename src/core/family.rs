//! Family identification and per-family persistent storage.
//!
//! ## FamilyId
//!
//! Type-safe family identifier supporting 2-255 families.
//!
//! ## FamilyMap
//!
//! Per-family data backed by `im::Vector` so that every edit returns a new
//! map sharing structure with the old one. Decks and scores are built on it.

use std::ops::Index;

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::{MAX_FAMILIES, MIN_FAMILIES};
use super::error::ValidationError;

/// Family (player faction) identifier.
///
/// Family indices are 0-based: the first family is `FamilyId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FamilyId(pub u8);

impl FamilyId {
    /// Create a new family ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw family index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all family IDs for a game with `family_count` families.
    ///
    /// ```
    /// use oriflamme::core::FamilyId;
    ///
    /// let families: Vec<_> = FamilyId::all(3).collect();
    /// assert_eq!(families, vec![FamilyId::new(0), FamilyId::new(1), FamilyId::new(2)]);
    /// ```
    pub fn all(family_count: usize) -> impl Iterator<Item = FamilyId> {
        (0..family_count.min(MAX_FAMILIES) as u8).map(FamilyId)
    }
}

impl std::fmt::Display for FamilyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Family {}", self.0)
    }
}

/// Checks that a family count is playable.
pub(crate) fn check_family_count(count: usize) -> Result<(), ValidationError> {
    if count < MIN_FAMILIES {
        return Err(ValidationError::TooFewFamilies { count, min: MIN_FAMILIES });
    }
    if count > MAX_FAMILIES {
        return Err(ValidationError::TooManyFamilies { count, max: MAX_FAMILIES });
    }
    Ok(())
}

/// Persistent per-family storage.
///
/// Cloning is O(1). Editing operations take `&self` and return a new map;
/// the original stays valid and unchanged.
///
/// ```
/// use oriflamme::core::{FamilyId, FamilyMap};
///
/// let scores: FamilyMap<i32> = FamilyMap::with_value(2, 0).unwrap();
/// let next = scores.set(FamilyId::new(1), 5).unwrap();
///
/// assert_eq!(scores[FamilyId::new(1)], 0);
/// assert_eq!(next[FamilyId::new(1)], 5);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FamilyMap<T: Clone> {
    data: Vector<T>,
}

impl<T: Clone> FamilyMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(family_count: usize, factory: impl Fn(FamilyId) -> T) -> Result<Self, ValidationError> {
        check_family_count(family_count)?;
        let data = FamilyId::all(family_count).map(factory).collect();
        Ok(Self { data })
    }

    /// Create a map with all entries set to the same value.
    pub fn with_value(family_count: usize, value: T) -> Result<Self, ValidationError> {
        Self::new(family_count, |_| value.clone())
    }

    /// Create a map from one value per family, in family order.
    pub fn from_values(values: impl IntoIterator<Item = T>) -> Result<Self, ValidationError> {
        let data: Vector<T> = values.into_iter().collect();
        check_family_count(data.len())?;
        Ok(Self { data })
    }

    /// Get the number of families.
    #[must_use]
    pub fn family_count(&self) -> usize {
        self.data.len()
    }

    /// Get a family's entry, checking the bound.
    pub fn get(&self, family: FamilyId) -> Result<&T, ValidationError> {
        self.data.get(family.index()).ok_or(ValidationError::FamilyOutOfRange {
            family: family.index(),
            count: self.data.len(),
        })
    }

    /// Return a new map with `family`'s entry replaced.
    pub fn set(&self, family: FamilyId, value: T) -> Result<Self, ValidationError> {
        self.check(family)?;
        Ok(Self { data: self.data.update(family.index(), value) })
    }

    /// Return a new map with `family`'s entry transformed by `f`.
    pub fn update_with<E>(
        &self,
        family: FamilyId,
        f: impl FnOnce(&T) -> Result<T, E>,
    ) -> Result<Self, E>
    where
        E: From<ValidationError>,
    {
        let value = f(self.get(family)?)?;
        Ok(Self { data: self.data.update(family.index(), value) })
    }

    /// Iterate over (FamilyId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (FamilyId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (FamilyId(i as u8), v))
    }

    /// Iterate over the values in family order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all family IDs.
    pub fn family_ids(&self) -> impl Iterator<Item = FamilyId> {
        FamilyId::all(self.data.len())
    }

    fn check(&self, family: FamilyId) -> Result<(), ValidationError> {
        if family.index() < self.data.len() {
            Ok(())
        } else {
            Err(ValidationError::FamilyOutOfRange {
                family: family.index(),
                count: self.data.len(),
            })
        }
    }
}

impl<T: Clone> Index<FamilyId> for FamilyMap<T> {
    type Output = T;

    /// Panics on an out-of-range family; use [`FamilyMap::get`] for a checked read.
    fn index(&self, family: FamilyId) -> &Self::Output {
        &self.data[family.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_id_basics() {
        let f0 = FamilyId::new(0);
        let f1 = FamilyId::new(1);

        assert_eq!(f0.index(), 0);
        assert_eq!(f1.index(), 1);
        assert_eq!(format!("{}", f1), "Family 1");
    }

    #[test]
    fn test_family_map_new() {
        let map: FamilyMap<i32> = FamilyMap::new(4, |f| f.index() as i32 * 10).unwrap();

        assert_eq!(map[FamilyId::new(0)], 0);
        assert_eq!(map[FamilyId::new(3)], 30);
        assert_eq!(map.family_count(), 4);
    }

    #[test]
    fn test_family_map_set_is_persistent() {
        let map: FamilyMap<i32> = FamilyMap::with_value(3, 1).unwrap();
        let edited = map.set(FamilyId::new(2), 9).unwrap();

        assert_eq!(map.values().copied().collect::<Vec<_>>(), vec![1, 1, 1]);
        assert_eq!(edited.values().copied().collect::<Vec<_>>(), vec![1, 1, 9]);
    }

    #[test]
    fn test_family_map_out_of_range() {
        let map: FamilyMap<i32> = FamilyMap::with_value(2, 0).unwrap();

        assert_eq!(
            map.set(FamilyId::new(2), 1),
            Err(ValidationError::FamilyOutOfRange { family: 2, count: 2 })
        );
        assert!(map.get(FamilyId::new(5)).is_err());
    }

    #[test]
    fn test_family_map_too_few_families() {
        let result: Result<FamilyMap<i32>, _> = FamilyMap::with_value(1, 0);
        assert_eq!(result, Err(ValidationError::TooFewFamilies { count: 1, min: 2 }));
    }

    #[test]
    fn test_family_map_iter() {
        let map = FamilyMap::from_values(vec![5, 6]).unwrap();
        let pairs: Vec<_> = map.iter().collect();

        assert_eq!(pairs, vec![(FamilyId::new(0), &5), (FamilyId::new(1), &6)]);
    }

    #[test]
    fn test_family_map_serialization() {
        let map = FamilyMap::from_values(vec![1, 2, 3]).unwrap();
        let json = serde_json::to_string(&map).unwrap();
        let deserialized: FamilyMap<i32> = serde_json::from_str(&json).unwrap();
        assert_eq!(map, deserialized);
    }
}
