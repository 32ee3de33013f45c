//! Board primitives: colors, points, keys, and sparse snapshots.
//!
//! These are size-agnostic. A board's dimensions live in its `PointCodec`,
//! which every snapshot carries.

pub mod color;
pub mod point;
pub mod snapshot;

pub use color::Color;
pub use point::{Key, Point, PointCodec, MAX_SIDE};
pub use snapshot::BoardSnapshot;
