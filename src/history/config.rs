//! History engine configuration.

use serde::{Deserialize, Serialize};

/// Default snapshot stride.
pub const DEFAULT_STRIDE: usize = 5;

/// Board dimensions and cache stride.
///
/// Dimensions are fixed once an engine is built. The stride can be changed
/// later with [`HistoryEngine::set_stride`](super::HistoryEngine::set_stride).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryConfig {
    /// Board width (columns).
    pub width: u32,

    /// Board height (rows).
    pub height: u32,

    /// A full snapshot is cached every `stride` turns.
    pub stride: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            width: 19,
            height: 19,
            stride: DEFAULT_STRIDE,
        }
    }
}

impl HistoryConfig {
    /// Configuration for a `width` x `height` board with the default stride.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            stride: DEFAULT_STRIDE,
        }
    }

    /// Configuration for a square board.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    /// Set the snapshot stride.
    #[must_use]
    pub fn with_stride(mut self, stride: usize) -> Self {
        self.stride = stride;
        self
    }
}
