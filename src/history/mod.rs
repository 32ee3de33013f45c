//! Versioned board history.
//!
//! ## Storage
//!
//! History is stored as one sparse [`Diff`] per committed turn plus a full
//! snapshot every `stride` turns. Reading any state costs at most
//! `stride - 1` diff applications from the nearest cached snapshot.
//!
//! ## Key Components
//!
//! - [`DiffStore`]: ordered per-turn diffs
//! - [`SnapshotCache`]: full snapshots at stride multiples
//! - [`HistoryEngine`]: staging, commit, undo, and reconstruction
//! - [`FrameView`]: lazy view of one historical state
//! - [`HistoryRecord`]: serializable input for rebuilding an engine
//!
//! ## Concurrency
//!
//! Everything is synchronous. Mutation takes `&mut self` and reads take
//! `&self`, so reads can never overlap a close, pop, or stride rebuild.
//! Callers sharing an engine between threads should hold one lock across a
//! whole "stage, then close" sequence.

mod cache;
mod config;
mod diff;
mod engine;
mod frame;
mod record;

pub use cache::SnapshotCache;
pub use config::{HistoryConfig, DEFAULT_STRIDE};
pub use diff::{Change, Diff, DiffStore};
pub use engine::{HistoryEngine, Result};
pub use frame::{FrameView, Traversal};
pub use record::HistoryRecord;
