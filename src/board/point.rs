//! Board coordinates and their dense integer keys.
//!
//! ## Key Layout
//!
//! `key = y * width + x`. For a fixed width this is a bijection between
//! on-board points and `0..width * height`.
//!
//! ```
//! use board_history::board::{Point, PointCodec};
//!
//! let codec = PointCodec::new(19, 19);
//! let key = codec.encode(Point::new(3, 2)).unwrap();
//! assert_eq!(key.raw(), 41);
//! assert_eq!(codec.decode(key), Point::new(3, 2));
//! ```

use serde::{Deserialize, Serialize};

use crate::error::HistoryError;

/// A board coordinate, zero-based.
///
/// Coordinates are signed so that off-board queries like `(-1, 0)` can be
/// expressed. Only the codec decides whether a point is on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Dense integer key for an on-board point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Key(pub u32);

impl Key {
    /// Create a key from its raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Get the raw key value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The key as a vector index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({})", self.0)
    }
}

/// Largest supported board side. Coordinates are `i32`, so every on-board
/// point has to fit in one.
pub const MAX_SIDE: u32 = i32::MAX as u32;

/// Maps points to keys and back for a fixed board size.
///
/// Deserialization goes through [`PointCodec::try_new`], so a decoded codec
/// satisfies the same bounds as a constructed one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Dimensions")]
pub struct PointCodec {
    width: u32,
    height: u32,
}

/// Unchecked wire form of a codec.
#[derive(Deserialize)]
struct Dimensions {
    width: u32,
    height: u32,
}

impl TryFrom<Dimensions> for PointCodec {
    type Error = HistoryError;

    fn try_from(dimensions: Dimensions) -> Result<Self, Self::Error> {
        Self::try_new(dimensions.width, dimensions.height)
    }
}

impl PointCodec {
    /// Create a codec for a `width` x `height` board.
    ///
    /// # Panics
    ///
    /// If either dimension is zero or above [`MAX_SIDE`], or the board has
    /// more than `u32::MAX` intersections.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width > 0, "Board width must be at least 1");
        assert!(height > 0, "Board height must be at least 1");
        assert!(
            width <= MAX_SIDE && height <= MAX_SIDE,
            "Board side must be at most i32::MAX"
        );
        assert!(
            width.checked_mul(height).is_some(),
            "Board has too many intersections"
        );
        Self { width, height }
    }

    /// Create a codec, rejecting unsupported dimensions instead of panicking.
    pub fn try_new(width: u32, height: u32) -> Result<Self, HistoryError> {
        let sides_fit = (1..=MAX_SIDE).contains(&width) && (1..=MAX_SIDE).contains(&height);
        if !sides_fit || width.checked_mul(height).is_none() {
            return Err(HistoryError::InvalidDimensions { width, height });
        }
        Ok(Self { width, height })
    }

    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of intersections on the board.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false: a board has at least one intersection.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        false
    }

    /// Is the point on the board?
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }

    /// Encode an on-board point.
    pub fn encode(&self, point: Point) -> Result<Key, HistoryError> {
        if !self.contains(point) {
            return Err(HistoryError::InvalidPoint {
                point,
                width: self.width,
                height: self.height,
            });
        }
        Ok(Key(point.y as u32 * self.width + point.x as u32))
    }

    /// Decode a key produced by this codec.
    ///
    /// Keys are only ever produced by `encode`, so any key below
    /// `width * height` is valid.
    #[must_use]
    pub fn decode(&self, key: Key) -> Point {
        debug_assert!(key.index() < self.len(), "{} out of range", key);
        Point::new((key.0 % self.width) as i32, (key.0 / self.width) as i32)
    }

    /// Is the key within this board?
    #[must_use]
    pub fn owns(&self, key: Key) -> bool {
        key.index() < self.len()
    }

    /// Every key on the board in ascending order (row-major).
    pub fn keys(&self) -> impl Iterator<Item = Key> {
        (0..self.width * self.height).map(Key)
    }

    /// Every point on the board in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.keys().map(move |key| self.decode(key))
    }
}
