//! Sparse board snapshot.
//!
//! A snapshot stores only occupied intersections. Absent keys are empty, and
//! queries outside the board answer `Offboard`, so callers can walk past the
//! edge without separate bounds checks.
//!
//! Storage is an `im::OrdMap`, so `clone()` is O(1) and shares structure with
//! the source. Mutating either copy afterwards copies the touched path only;
//! the other copy never observes the change.

use im::OrdMap;
use serde::{Deserialize, Serialize};

use super::color::Color;
use super::point::{Key, Point, PointCodec};
use crate::error::HistoryError;

/// Full board state at one turn.
///
/// Every entry is an on-board key holding a stone. Deserialization checks
/// this before handing out a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredSnapshot")]
pub struct BoardSnapshot {
    codec: PointCodec,
    stones: OrdMap<Key, Color>,
}

/// Unchecked wire form of a snapshot.
#[derive(Deserialize)]
struct StoredSnapshot {
    codec: PointCodec,
    stones: OrdMap<Key, Color>,
}

impl TryFrom<StoredSnapshot> for BoardSnapshot {
    type Error = HistoryError;

    fn try_from(stored: StoredSnapshot) -> Result<Self, Self::Error> {
        for (&key, &color) in stored.stones.iter() {
            if !stored.codec.owns(key) {
                return Err(HistoryError::InvalidKey {
                    key,
                    len: stored.codec.len(),
                });
            }
            if !color.is_stone() {
                return Err(HistoryError::InvalidColor(color));
            }
        }
        Ok(Self {
            codec: stored.codec,
            stones: stored.stones,
        })
    }
}

impl BoardSnapshot {
    /// An empty board.
    #[must_use]
    pub fn empty(codec: PointCodec) -> Self {
        Self {
            codec,
            stones: OrdMap::new(),
        }
    }

    #[must_use]
    pub fn codec(&self) -> &PointCodec {
        &self.codec
    }

    /// Contents at a point: `Offboard` outside the board, `Empty` if unoccupied.
    #[must_use]
    pub fn get(&self, point: Point) -> Color {
        match self.codec.encode(point) {
            Ok(key) => self.get_key(key),
            Err(_) => Color::Offboard,
        }
    }

    /// Contents at a key.
    #[must_use]
    pub fn get_key(&self, key: Key) -> Color {
        if !self.codec.owns(key) {
            return Color::Offboard;
        }
        self.stones.get(&key).copied().unwrap_or(Color::Empty)
    }

    /// Place `color` at `point`. `Empty` clears the point.
    pub fn put(&mut self, point: Point, color: Color) -> Result<(), HistoryError> {
        if color == Color::Offboard {
            return Err(HistoryError::InvalidColor(color));
        }
        let key = self.codec.encode(point)?;
        self.set_key(key, color);
        Ok(())
    }

    /// Clear `point`.
    pub fn take(&mut self, point: Point) -> Result<(), HistoryError> {
        let key = self.codec.encode(point)?;
        self.stones.remove(&key);
        Ok(())
    }

    /// Set a key that is already known to be on the board.
    ///
    /// `Empty` removes the entry, so the map never holds an empty value.
    pub(crate) fn set_key(&mut self, key: Key, color: Color) {
        debug_assert!(self.codec.owns(key));
        debug_assert_ne!(color, Color::Offboard);
        if color == Color::Empty {
            self.stones.remove(&key);
        } else {
            self.stones.insert(key, color);
        }
    }

    /// Number of stones on the board.
    #[must_use]
    pub fn stone_count(&self) -> usize {
        self.stones.len()
    }

    /// Number of intersections holding `color`.
    #[must_use]
    pub fn count(&self, color: Color) -> usize {
        match color {
            Color::Black | Color::White => self.stones.values().filter(|&&c| c == color).count(),
            Color::Empty => self.codec.len() - self.stones.len(),
            Color::Offboard => 0,
        }
    }

    /// No stones on the board?
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    /// Occupied intersections in key order.
    pub fn stones(&self) -> impl Iterator<Item = (Point, Color)> + '_ {
        self.stones
            .iter()
            .map(move |(&key, &color)| (self.codec.decode(key), color))
    }
}
