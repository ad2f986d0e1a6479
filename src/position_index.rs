//! Value-to-position index for array-backed heaps
//!
//! A [`PositionIndex`] records, for every distinct value stored in a heap, the
//! set of array slots currently holding that value. It lets a heap answer
//! "is this value present?" in O(1) and find a slot to remove in O(log k),
//! where k is the multiplicity of the value.
//!
//! # Invariants
//!
//! The owning heap keeps the index in lockstep with its array:
//! - every slot `i` of the array is recorded under the value stored at `i`
//! - every recorded slot holds a value equal to its key
//! - no key maps to an empty set (empty sets are dropped immediately)
//! - the total number of recorded slots equals the array length
//!
//! The index itself never looks at the array; [`PositionIndex::is_consistent_with`]
//! lets a caller audit the pairing.

use rustc_hash::FxHashMap;
use std::collections::BTreeSet;
use std::hash::Hash;

/// Multimap from values to the ordered set of heap slots holding them
///
/// Slots are kept in a `BTreeSet` so the largest slot for a value is available
/// without scanning. Removal by value always targets that largest slot.
#[derive(Debug, Clone)]
pub struct PositionIndex<T> {
    positions: FxHashMap<T, BTreeSet<usize>>,
}

impl<T: Hash + Eq + Clone> PositionIndex<T> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self {
            positions: FxHashMap::default(),
        }
    }

    /// Creates an empty index sized for roughly `capacity` distinct values
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Records that `position` now holds `value`
    pub fn insert(&mut self, value: &T, position: usize) {
        match self.positions.get_mut(value) {
            Some(set) => {
                set.insert(position);
            }
            None => {
                let mut set = BTreeSet::new();
                set.insert(position);
                self.positions.insert(value.clone(), set);
            }
        }
    }

    /// Forgets that `position` holds `value`
    ///
    /// Drops the entry for `value` once its last position is gone.
    pub fn remove(&mut self, value: &T, position: usize) {
        if let Some(set) = self.positions.get_mut(value) {
            set.remove(&position);
            if set.is_empty() {
                self.positions.remove(value);
            }
        }
    }

    /// Returns the largest position holding `value`
    pub fn last_position(&self, value: &T) -> Option<usize> {
        self.positions
            .get(value)
            .and_then(|set| set.last().copied())
    }

    /// Records that the values at `first_pos` and `second_pos` traded places
    ///
    /// `first` and `second` are the values as they were *before* the exchange:
    /// `first` lived at `first_pos` and now lives at `second_pos`, and the
    /// other way round.
    pub fn swap(&mut self, first: &T, second: &T, first_pos: usize, second_pos: usize) {
        if first_pos == second_pos || first == second {
            return;
        }
        if let Some(set) = self.positions.get_mut(first) {
            set.remove(&first_pos);
            set.insert(second_pos);
        }
        if let Some(set) = self.positions.get_mut(second) {
            set.remove(&second_pos);
            set.insert(first_pos);
        }
    }

    /// Returns true if at least one position holds `value`
    pub fn contains(&self, value: &T) -> bool {
        self.positions.contains_key(value)
    }

    /// Number of positions holding `value`
    pub fn count(&self, value: &T) -> usize {
        self.positions.get(value).map_or(0, BTreeSet::len)
    }

    /// Number of distinct values indexed
    pub fn distinct_len(&self) -> usize {
        self.positions.len()
    }

    /// Total number of positions recorded across all values
    pub fn total_positions(&self) -> usize {
        self.positions.values().map(BTreeSet::len).sum()
    }

    /// Drops every entry
    pub fn clear(&mut self) {
        self.positions.clear();
    }

    /// Checks that this index describes `slots` exactly
    ///
    /// O(n) plus one hash lookup per slot.
    pub fn is_consistent_with(&self, slots: &[T]) -> bool {
        if self.total_positions() != slots.len() {
            return false;
        }
        let every_slot_indexed = slots.iter().enumerate().all(|(i, value)| {
            self.positions
                .get(value)
                .is_some_and(|set| set.contains(&i))
        });
        if !every_slot_indexed {
            return false;
        }
        self.positions.iter().all(|(value, set)| {
            !set.is_empty()
                && set
                    .iter()
                    .all(|&i| slots.get(i).is_some_and(|slot| slot == value))
        })
    }
}

impl<T: Hash + Eq + Clone> Default for PositionIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}
