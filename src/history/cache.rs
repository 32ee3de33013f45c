//! Periodic full-snapshot cache.
//!
//! The cache keeps a full snapshot at every turn index that is a multiple of
//! `stride`, including index 0. Any other state is at most `stride - 1` diff
//! applications away from its anchor `t - t % stride`.
//!
//! Reads hand out clones. Entries are never mutated after insertion.

use rustc_hash::FxHashMap;

use super::diff::DiffStore;
use crate::board::BoardSnapshot;
use crate::error::HistoryError;

/// Turn index → snapshot, at a fixed stride.
#[derive(Clone, Debug)]
pub struct SnapshotCache {
    stride: usize,
    entries: FxHashMap<usize, BoardSnapshot>,
}

impl SnapshotCache {
    /// Create a cache holding `initial` as state 0.
    pub fn new(stride: usize, initial: BoardSnapshot) -> Result<Self, HistoryError> {
        if stride == 0 {
            return Err(HistoryError::InvalidStride(stride));
        }
        let mut entries = FxHashMap::default();
        entries.insert(0, initial);
        Ok(Self { stride, entries })
    }

    /// Build a cache at `stride` for the history starting at `initial`.
    ///
    /// Replays every diff once from state 0. The result is complete before it
    /// is returned, so callers can swap it in atomically.
    pub fn rebuild(
        stride: usize,
        initial: BoardSnapshot,
        diffs: &DiffStore,
    ) -> Result<Self, HistoryError> {
        let mut cache = Self::new(stride, initial.clone())?;
        let mut state = initial;
        for (i, diff) in diffs.iter().enumerate() {
            diff.apply_forward(&mut state);
            cache.store(i + 1, &state);
        }
        Ok(cache)
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Is `index` a stride multiple?
    #[must_use]
    pub fn is_anchor(&self, index: usize) -> bool {
        index % self.stride == 0
    }

    /// Nearest anchor at or before `index`.
    #[must_use]
    pub fn anchor_for(&self, index: usize) -> usize {
        index - index % self.stride
    }

    /// Copy of the snapshot at `index`, if cached.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<BoardSnapshot> {
        self.entries.get(&index).cloned()
    }

    /// Copy of the nearest cached state at or before `index`, with its index.
    ///
    /// Usually the anchor `index - index % stride`. State 0 is always cached,
    /// so the walk down always terminates.
    #[must_use]
    pub fn nearest(&self, index: usize) -> (usize, BoardSnapshot) {
        let mut origin = self.anchor_for(index);
        loop {
            if let Some(state) = self.entries.get(&origin) {
                return (origin, state.clone());
            }
            origin -= self.stride;
        }
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.entries.contains_key(&index)
    }

    /// Store a copy of `state` if `index` is an anchor.
    ///
    /// Returns true if an entry was stored.
    pub fn store(&mut self, index: usize, state: &BoardSnapshot) -> bool {
        if !self.is_anchor(index) {
            return false;
        }
        self.entries.insert(index, state.clone());
        true
    }

    /// Drop the entry at `index`. State 0 is never evicted.
    pub fn evict(&mut self, index: usize) -> Option<BoardSnapshot> {
        if index == 0 {
            return None;
        }
        self.entries.remove(&index)
    }

    /// Cached indices in ascending order.
    #[must_use]
    pub fn indices(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = self.entries.keys().copied().collect();
        indices.sort_unstable();
        indices
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: state 0 is always cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
