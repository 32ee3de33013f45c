//! # board-history
//!
//! A versioned board-state store for two-color grid games.
//!
//! Callers stage stone placements and removals, commit them as turns, and
//! read back the exact board at any turn without a full snapshot per turn.
//!
//! ## Design Principles
//!
//! 1. **Rules-Agnostic**: The history engine knows nothing about captures, ko,
//!    or scoring. Rulesets drive it through `put` / `take` / `close`.
//!
//! 2. **Sparse Storage**: One diff per turn, plus a full snapshot every
//!    `stride` turns. Any state is at most `stride - 1` diffs from a snapshot.
//!
//! 3. **Fail Fast**: Invalid points, colors, and indices are rejected before
//!    anything is mutated.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Snapshots are `im` maps, so handing out
//!   independent copies is O(1) and mutation never leaks between copies.
//!
//! - **Forward Replay**: States are rebuilt forward from the nearest cached
//!   snapshot at or before the requested turn.
//!
//! ## Modules
//!
//! - `board`: Colors, points, keys, and sparse snapshots
//! - `history`: Diffs, snapshot cache, history engine, lazy frames
//! - `events`: Synchronous listener registry
//! - `rules`: Rules trait and a placement-only ruleset
//! - `timer`: Timer trait and absolute time control
//! - `game`: Orchestrator tying rules, timer, and history together

pub mod board;
pub mod error;
pub mod events;
pub mod game;
pub mod history;
pub mod rules;
pub mod timer;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::board::{BoardSnapshot, Color, Key, Point, PointCodec};

pub use crate::error::{HistoryError, RecordFault};

pub use crate::history::{
    Change, Diff, DiffStore, FrameView, HistoryConfig, HistoryEngine, HistoryRecord,
    SnapshotCache, Traversal, DEFAULT_STRIDE,
};

pub use crate::events::{ListenerId, ListenerRegistry};

pub use crate::rules::{OpenRules, RuleCode, Rules, Score};

pub use crate::timer::{AbsoluteTimer, Timer};

pub use crate::game::{Game, GameError, GameOutcome};
