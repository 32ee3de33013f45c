//! Serializable history record.
//!
//! A record holds the board size, the stride, and the diff store. That is
//! enough to rebuild every cached snapshot; see
//! [`HistoryEngine::from_record`](super::HistoryEngine::from_record).
//! No particular encoding is prescribed: any serde format works.

use serde::{Deserialize, Serialize};

use super::config::HistoryConfig;
use super::diff::DiffStore;

/// Committed history of one engine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub width: u32,
    pub height: u32,
    pub stride: usize,
    pub diffs: DiffStore,
}

impl HistoryRecord {
    /// Engine configuration for this record.
    #[must_use]
    pub fn config(&self) -> HistoryConfig {
        HistoryConfig::new(self.width, self.height).with_stride(self.stride)
    }
}
