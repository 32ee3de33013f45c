//! Lazy read-only view of one historical state.
//!
//! A frame is bound to a turn index when created and reconstructs nothing
//! until it is first read. The reconstructed snapshot then lives inside the
//! frame only; the engine's cache is not touched.
//!
//! ```
//! use board_history::board::{Color, Point};
//! use board_history::history::{HistoryConfig, HistoryEngine, Traversal};
//!
//! let mut history = HistoryEngine::new(HistoryConfig::square(3)).unwrap();
//! history.put(&[(Point::new(2, 0), Color::White)]).unwrap();
//! history.close();
//!
//! let mut frame = history.frame(1).unwrap();
//! assert!(!frame.is_rendered());
//! assert_eq!(frame.get(2, 0), Color::White);
//! assert_eq!(frame.get(3, 0), Color::Offboard);
//! assert!(frame.is_rendered());
//!
//! let first_column: Vec<_> = frame.iter(Traversal::ColumnMajor).take(3).collect();
//! assert_eq!(first_column[1], (Point::new(0, 1), Color::Empty));
//! ```

use super::engine::HistoryEngine;
use crate::board::{BoardSnapshot, Color, Point, PointCodec};

/// Order in which a frame walks the board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Traversal {
    /// Left to right, then top to bottom.
    #[default]
    RowMajor,
    /// Top to bottom, then left to right.
    ColumnMajor,
}

impl Traversal {
    /// Every point of `codec`'s board in this order.
    pub fn points(self, codec: &PointCodec) -> impl Iterator<Item = Point> {
        // Sides are at most MAX_SIDE, so both fit in i32.
        let (width, height) = (codec.width() as i32, codec.height() as i32);
        let (outer, inner) = match self {
            Traversal::RowMajor => (height, width),
            Traversal::ColumnMajor => (width, height),
        };
        (0..outer).flat_map(move |o| {
            (0..inner).map(move |i| match self {
                Traversal::RowMajor => Point::new(i, o),
                Traversal::ColumnMajor => Point::new(o, i),
            })
        })
    }
}

/// Whether a frame has reconstructed its state yet.
#[derive(Clone, Debug)]
enum FrameState {
    Unrendered,
    Rendered(BoardSnapshot),
}

/// Lazy view of the state after `index` turns.
///
/// Borrows the engine, so the history cannot change while a frame exists.
#[derive(Debug)]
pub struct FrameView<'a> {
    history: &'a HistoryEngine,
    index: usize,
    state: FrameState,
}

impl<'a> FrameView<'a> {
    /// `index` must already be checked against the engine's length.
    pub(crate) fn new(history: &'a HistoryEngine, index: usize) -> Self {
        Self {
            history,
            index,
            state: FrameState::Unrendered,
        }
    }

    /// Turn index this frame is bound to.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// `(width, height)` of the board.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.history.dimensions()
    }

    #[must_use]
    pub fn is_rendered(&self) -> bool {
        matches!(self.state, FrameState::Rendered(_))
    }

    /// Reconstruct the state if not done yet.
    pub fn render(&mut self) -> &BoardSnapshot {
        if let FrameState::Unrendered = self.state {
            self.state = FrameState::Rendered(self.history.state_at(self.index));
        }
        match &self.state {
            FrameState::Rendered(snapshot) => snapshot,
            FrameState::Unrendered => unreachable!("frame rendered above"),
        }
    }

    /// Contents at `(x, y)`. Off the board this is `Offboard`, never an error.
    pub fn get(&mut self, x: i32, y: i32) -> Color {
        self.at(Point::new(x, y))
    }

    /// Contents at `point`.
    pub fn at(&mut self, point: Point) -> Color {
        self.render().get(point)
    }

    /// Every point with its contents, in `order`.
    pub fn iter(&mut self, order: Traversal) -> impl Iterator<Item = (Point, Color)> + '_ {
        let codec = *self.history.codec();
        let snapshot = self.render();
        order
            .points(&codec)
            .map(move |point| (point, snapshot.get(point)))
    }

    /// The board as rows, indexed `[y][x]`.
    pub fn rows(&mut self) -> Vec<Vec<Color>> {
        let (width, _) = self.dimensions();
        let cells: Vec<Color> = self.iter(Traversal::RowMajor).map(|(_, c)| c).collect();
        cells.chunks(width as usize).map(<[Color]>::to_vec).collect()
    }

    /// Consume the frame, keeping its snapshot.
    pub fn into_snapshot(mut self) -> BoardSnapshot {
        self.render();
        match self.state {
            FrameState::Rendered(snapshot) => snapshot,
            FrameState::Unrendered => unreachable!("frame rendered above"),
        }
    }
}
