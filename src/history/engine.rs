//! The history engine.
//!
//! ## Turn Protocol
//!
//! - `put` / `take` stage changes into the working state.
//! - `close` commits them as one turn: the diff between the committed and
//!   working states is appended, the working state becomes the committed
//!   state, and a snapshot is cached if the new index is a stride multiple.
//! - `pop` retracts the most recent turn, but only while nothing is staged.
//!
//! ## Ownership
//!
//! The working state, the committed state, and every cache entry are
//! separate `BoardSnapshot` values. Moving state between those roles always
//! goes through `clone()`, and readers only ever receive clones.

use log::{debug, trace};
use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use super::cache::SnapshotCache;
use super::config::HistoryConfig;
use super::diff::{Diff, DiffStore};
use super::frame::FrameView;
use super::record::HistoryRecord;
use crate::board::{BoardSnapshot, Color, Key, Point, PointCodec};
use crate::error::HistoryError;

/// Result type for history operations.
pub type Result<T> = std::result::Result<T, HistoryError>;

/// Versioned board-state store.
///
/// ```
/// use board_history::board::{Color, Point};
/// use board_history::history::{HistoryConfig, HistoryEngine};
///
/// let mut history = HistoryEngine::new(HistoryConfig::square(9)).unwrap();
/// history.put(&[(Point::new(0, 0), Color::Black)]).unwrap();
/// history.close();
/// history.put(&[(Point::new(1, 0), Color::White)]).unwrap();
/// history.close();
///
/// assert_eq!(history.len(), 3);
/// let first = history.get_state(1).unwrap();
/// assert_eq!(first.get(Point::new(0, 0)), Color::Black);
/// assert_eq!(first.get(Point::new(1, 0)), Color::Empty);
/// ```
#[derive(Clone, Debug)]
pub struct HistoryEngine {
    codec: PointCodec,
    diffs: DiffStore,
    cache: SnapshotCache,
    committed: BoardSnapshot,
    working: BoardSnapshot,
    /// Keys staged since the last close.
    touched: FxHashSet<Key>,
}

impl HistoryEngine {
    /// Create an engine with an empty board as state 0.
    ///
    /// Fails with `InvalidDimensions` for a board the codec cannot represent
    /// and `InvalidStride` for a zero stride.
    pub fn new(config: HistoryConfig) -> Result<Self> {
        let codec = PointCodec::try_new(config.width, config.height)?;
        let initial = BoardSnapshot::empty(codec);
        let cache = SnapshotCache::new(config.stride, initial.clone())?;

        Ok(Self {
            codec,
            diffs: DiffStore::new(),
            cache,
            committed: initial.clone(),
            working: initial,
            touched: FxHashSet::default(),
        })
    }

    /// Rebuild an engine from a record, replaying and checking every diff.
    pub fn from_record(record: HistoryRecord) -> Result<Self> {
        let mut engine = Self::new(record.config())?;

        for (turn, diff) in record.diffs.iter().enumerate() {
            diff.check(&engine.codec, &engine.committed)
                .map_err(|fault| {
                    log::warn!("rejecting history record at turn {}: {}", turn, fault);
                    HistoryError::InvalidRecord { turn, fault }
                })?;
            diff.apply_forward(&mut engine.committed);
            let index = engine.diffs.append(diff.clone()) + 1;
            engine.cache.store(index, &engine.committed);
        }
        engine.working = engine.committed.clone();

        debug!(
            "rebuilt history of {} turns on {}x{} board (stride {})",
            engine.turns(),
            record.width,
            record.height,
            engine.stride()
        );
        Ok(engine)
    }

    /// Everything needed to rebuild this engine's committed history.
    ///
    /// Staged changes are not part of the record.
    #[must_use]
    pub fn record(&self) -> HistoryRecord {
        HistoryRecord {
            width: self.codec.width(),
            height: self.codec.height(),
            stride: self.cache.stride(),
            diffs: self.diffs.clone(),
        }
    }

    // === Dimensions and configuration ===

    #[must_use]
    pub fn codec(&self) -> &PointCodec {
        &self.codec
    }

    /// `(width, height)`.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.codec.width(), self.codec.height())
    }

    #[must_use]
    pub fn stride(&self) -> usize {
        self.cache.stride()
    }

    /// Change the snapshot stride, rebuilding the whole cache.
    ///
    /// The new cache is built off to the side and swapped in once complete.
    /// On error the old cache is untouched.
    pub fn set_stride(&mut self, stride: usize) -> Result<()> {
        if stride == self.cache.stride() {
            return Ok(());
        }
        let initial = BoardSnapshot::empty(self.codec);
        let rebuilt = SnapshotCache::rebuild(stride, initial, &self.diffs)?;
        debug!(
            "snapshot stride {} -> {}: {} cached states",
            self.cache.stride(),
            stride,
            rebuilt.len()
        );
        self.cache = rebuilt;
        Ok(())
    }

    // === Staging ===

    /// Stage stones into the working state.
    ///
    /// Every entry is validated before any is applied. A later entry for the
    /// same point overwrites an earlier one, within this call or across calls
    /// in the same open turn.
    pub fn put(&mut self, stones: &[(Point, Color)]) -> Result<()> {
        let staged = stones
            .iter()
            .map(|&(point, color)| {
                let key = self.codec.encode(point)?;
                if !color.is_stone() {
                    return Err(HistoryError::InvalidColor(color));
                }
                Ok((key, color))
            })
            .collect::<Result<SmallVec<[(Key, Color); 4]>>>()?;

        for (key, color) in staged {
            self.working.set_key(key, color);
            self.touched.insert(key);
        }
        Ok(())
    }

    /// Clear points in the working state. Already-empty points are a no-op.
    pub fn take(&mut self, points: &[Point]) -> Result<()> {
        let staged = points
            .iter()
            .map(|&point| self.codec.encode(point))
            .collect::<Result<SmallVec<[Key; 4]>>>()?;

        for key in staged {
            self.working.set_key(key, Color::Empty);
            self.touched.insert(key);
        }
        Ok(())
    }

    /// The diff `close` would commit right now.
    #[must_use]
    pub fn pending_diff(&self) -> Diff {
        Diff::from_touched(&self.committed, &self.working, self.touched.iter().copied())
    }

    /// Does the working state differ from the committed state?
    #[must_use]
    pub fn has_pending_changes(&self) -> bool {
        self.touched
            .iter()
            .any(|&key| self.committed.get_key(key) != self.working.get_key(key))
    }

    /// Read-only view of the working state.
    #[must_use]
    pub fn working(&self) -> &BoardSnapshot {
        &self.working
    }

    // === Committing ===

    /// Commit the open turn, returning the new turn index.
    ///
    /// An open turn with no net changes commits an empty diff.
    pub fn close(&mut self) -> usize {
        let diff = self.pending_diff();
        debug_assert_eq!(
            diff,
            Diff::full_scan(&self.committed, &self.working),
            "incremental diff disagrees with full scan"
        );

        let changes = diff.len();
        let index = self.diffs.append(diff) + 1;
        // The working state carries on as the next turn's starting point.
        self.committed = self.working.clone();
        self.touched.clear();
        let cached = self.cache.store(index, &self.committed);

        debug!(
            "closed turn {} ({} changes{})",
            index,
            changes,
            if cached { ", cached" } else { "" }
        );
        index
    }

    /// Retract the most recent turn, returning its diff.
    ///
    /// Fails if anything is staged or no turn has been committed.
    pub fn pop(&mut self) -> Result<Diff> {
        if self.has_pending_changes() {
            return Err(HistoryError::PreconditionViolation(
                "pop requires an empty working state",
            ));
        }
        let Some(diff) = self.diffs.pop() else {
            return Err(HistoryError::PreconditionViolation("no committed turn to pop"));
        };

        let removed = self.diffs.len() + 1;
        self.cache.evict(removed);
        diff.apply_backward(&mut self.committed);
        self.working = self.committed.clone();
        self.touched.clear();

        debug!("popped turn {} ({} changes)", removed, diff.len());
        Ok(diff)
    }

    // === Queries ===

    /// Number of states: committed turns plus the initial state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.diffs.len() + 1
    }

    /// Always false: state 0 always exists.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of committed turns.
    #[must_use]
    pub fn turns(&self) -> usize {
        self.diffs.len()
    }

    #[must_use]
    pub fn diffs(&self) -> &DiffStore {
        &self.diffs
    }

    /// Turn indices currently holding a cached snapshot, ascending.
    #[must_use]
    pub fn cached_indices(&self) -> Vec<usize> {
        self.cache.indices()
    }

    /// Resolve a possibly negative index; `-1` is the latest state.
    pub fn resolve(&self, index: i64) -> Result<usize> {
        let len = self.len();
        let resolved = if index < 0 { index + len as i64 } else { index };
        if resolved < 0 || resolved >= len as i64 {
            return Err(HistoryError::InvalidIndex { index, len });
        }
        Ok(resolved as usize)
    }

    /// Board state after `index` turns, as an independent copy.
    pub fn get_state(&self, index: usize) -> Result<BoardSnapshot> {
        self.check_index(index)?;
        Ok(self.state_at(index))
    }

    /// The most recently committed state, as an independent copy.
    #[must_use]
    pub fn latest(&self) -> BoardSnapshot {
        self.committed.clone()
    }

    /// Lazy view of state `index`.
    pub fn frame(&self, index: usize) -> Result<FrameView<'_>> {
        self.check_index(index)?;
        Ok(FrameView::new(self, index))
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(HistoryError::InvalidIndex {
                index: index as i64,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// Reconstruct state `index`, which must be in range.
    pub(crate) fn state_at(&self, index: usize) -> BoardSnapshot {
        if let Some(state) = self.cache.get(index) {
            trace!("state {} served from cache", index);
            return state;
        }
        let (origin, mut state) = self.cache.nearest(index);
        self.diffs.replay(&mut state, origin..index);
        trace!("state {} replayed from {} ({} diffs)", index, origin, index - origin);
        state
    }
}
