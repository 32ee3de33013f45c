//! Per-turn diffs and the ordered diff store.
//!
//! ## Diff
//!
//! A diff lists every intersection whose contents changed between two
//! consecutive turns, as `(removed, added)` pairs sorted by key. Forward
//! application writes `added`, backward application writes `removed`, so a
//! diff is exactly invertible.
//!
//! Two ways to compute one:
//! - [`Diff::from_touched`]: compare only the keys staged during the open turn.
//!   This is what the engine uses on every close.
//! - [`Diff::full_scan`]: compare every intersection. O(width * height); kept
//!   as the reference the incremental result is checked against.

use std::ops::Range;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::board::{BoardSnapshot, Color, Key, PointCodec};
use crate::error::RecordFault;

/// One intersection's change within a turn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Change {
    pub key: Key,
    /// Contents before the turn.
    pub removed: Color,
    /// Contents after the turn.
    pub added: Color,
}

impl Change {
    /// The same change, undone.
    #[must_use]
    pub const fn inverted(self) -> Self {
        Self {
            key: self.key,
            removed: self.added,
            added: self.removed,
        }
    }
}

/// Sparse changes turning state `i` into state `i + 1`.
///
/// Most turns touch one or two intersections, so changes are stored inline.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diff {
    changes: SmallVec<[Change; 4]>,
}

impl Diff {
    /// An empty diff (a pass, or any turn with no net change).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare every intersection of two snapshots of the same board.
    #[must_use]
    pub fn full_scan(before: &BoardSnapshot, after: &BoardSnapshot) -> Self {
        debug_assert_eq!(before.codec(), after.codec());
        Self::collect(before, after, before.codec().keys())
    }

    /// Compare only `touched` keys.
    ///
    /// Keys may arrive in any order and repeat. Keys that ended the turn with
    /// their original contents produce no change.
    #[must_use]
    pub fn from_touched(
        before: &BoardSnapshot,
        after: &BoardSnapshot,
        touched: impl IntoIterator<Item = Key>,
    ) -> Self {
        let mut keys: SmallVec<[Key; 8]> = touched.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        Self::collect(before, after, keys)
    }

    fn collect(
        before: &BoardSnapshot,
        after: &BoardSnapshot,
        keys: impl IntoIterator<Item = Key>,
    ) -> Self {
        let changes = keys
            .into_iter()
            .filter_map(|key| {
                let removed = before.get_key(key);
                let added = after.get_key(key);
                (removed != added).then_some(Change { key, removed, added })
            })
            .collect();
        Self { changes }
    }

    /// Build a diff from explicit changes, sorting them by key.
    ///
    /// Used when rebuilding from a record; see [`Diff::check`].
    #[must_use]
    pub fn from_changes(changes: impl IntoIterator<Item = Change>) -> Self {
        let mut changes: SmallVec<[Change; 4]> = changes.into_iter().collect();
        changes.sort_unstable_by_key(|c| c.key);
        Self { changes }
    }

    /// Changes in ascending key order.
    #[must_use]
    pub fn changes(&self) -> &[Change] {
        &self.changes
    }

    /// Change recorded for `key`, if any.
    #[must_use]
    pub fn get(&self, key: Key) -> Option<&Change> {
        self.changes
            .binary_search_by_key(&key, |c| c.key)
            .ok()
            .map(|i| &self.changes[i])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.changes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Write every `added` color into `state`.
    pub fn apply_forward(&self, state: &mut BoardSnapshot) {
        for change in &self.changes {
            debug_assert_eq!(state.get_key(change.key), change.removed);
            state.set_key(change.key, change.added);
        }
    }

    /// Write every `removed` color into `state`.
    pub fn apply_backward(&self, state: &mut BoardSnapshot) {
        for change in &self.changes {
            debug_assert_eq!(state.get_key(change.key), change.added);
            state.set_key(change.key, change.removed);
        }
    }

    /// The diff that undoes this one.
    #[must_use]
    pub fn inverted(&self) -> Self {
        Self {
            changes: self.changes.iter().map(|c| c.inverted()).collect(),
        }
    }

    /// Check this diff can be applied forward to `state` on `codec`'s board.
    ///
    /// Returns the first problem found.
    pub fn check(&self, codec: &PointCodec, state: &BoardSnapshot) -> Result<(), RecordFault> {
        let mut previous: Option<Key> = None;
        for change in &self.changes {
            let key = change.key;
            if !codec.owns(key) {
                return Err(RecordFault::OutOfBoard(key));
            }
            if previous.is_some_and(|p| p >= key) {
                return Err(RecordFault::OutOfOrder(key));
            }
            if change.removed == change.added {
                return Err(RecordFault::NoChange(key));
            }
            if change.removed == Color::Offboard || change.added == Color::Offboard {
                return Err(RecordFault::Offboard(key));
            }
            let found = state.get_key(key);
            if found != change.removed {
                return Err(RecordFault::Mismatch {
                    key,
                    found,
                    removed: change.removed,
                });
            }
            previous = Some(key);
        }
        Ok(())
    }
}

/// Ordered per-turn diffs. Diff `i` turns state `i` into state `i + 1`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiffStore {
    diffs: Vec<Diff>,
}

impl DiffStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a diff, returning its index.
    pub fn append(&mut self, diff: Diff) -> usize {
        self.diffs.push(diff);
        self.diffs.len() - 1
    }

    /// Remove the most recent diff.
    pub fn pop(&mut self) -> Option<Diff> {
        self.diffs.pop()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Diff> {
        self.diffs.get(index)
    }

    /// Number of committed turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diffs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.diffs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diff> {
        self.diffs.iter()
    }

    /// Apply diffs `range` forward, turning state `range.start` into state
    /// `range.end`.
    pub fn replay(&self, state: &mut BoardSnapshot, range: Range<usize>) {
        for diff in &self.diffs[range] {
            diff.apply_forward(state);
        }
    }
}

impl FromIterator<Diff> for DiffStore {
    fn from_iter<I: IntoIterator<Item = Diff>>(iter: I) -> Self {
        Self {
            diffs: iter.into_iter().collect(),
        }
    }
}
