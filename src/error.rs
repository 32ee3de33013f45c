//! Error types.
//!
//! Every error here is a caller contract violation rather than a transient
//! fault. Operations validate their whole input before mutating anything, so
//! a rejected call leaves the engine exactly as it was.

use thiserror::Error;

use crate::board::{Color, Key, Point};

/// Errors raised by the history engine and its components.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum HistoryError {
    /// Board dimensions the codec cannot represent.
    #[error("board size {width}x{height} is not supported")]
    InvalidDimensions { width: u32, height: u32 },

    /// Point lies outside the board.
    #[error("point {point} is outside the {width}x{height} board")]
    InvalidPoint {
        point: Point,
        width: u32,
        height: u32,
    },

    /// Key lies outside the board.
    #[error("{key} is outside a board of {len} intersections")]
    InvalidKey { key: Key, len: usize },

    /// Color cannot be stored or staged in this position.
    #[error("color {0} is not valid here")]
    InvalidColor(Color),

    /// Turn index outside `[0, len)`.
    #[error("turn index {index} is outside history of length {len}")]
    InvalidIndex { index: i64, len: usize },

    /// Operation called in a state that does not permit it.
    #[error("precondition violated: {0}")]
    PreconditionViolation(&'static str),

    /// Snapshot stride must be at least 1.
    #[error("snapshot stride must be at least 1, got {0}")]
    InvalidStride(usize),

    /// A history record could not be replayed.
    #[error("invalid history record at turn {turn}: {fault}")]
    InvalidRecord {
        turn: usize,
        #[source]
        fault: RecordFault,
    },
}

/// Why a recorded diff cannot be applied.
#[derive(Error, Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordFault {
    #[error("{0} is outside the board")]
    OutOfBoard(Key),

    #[error("{0} is duplicated or out of order")]
    OutOfOrder(Key),

    #[error("{0} records no change")]
    NoChange(Key),

    #[error("{0} records an offboard color")]
    Offboard(Key),

    #[error("{key} holds {found} but the diff removes {removed}")]
    Mismatch {
        key: Key,
        found: Color,
        removed: Color,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = HistoryError::InvalidPoint {
            point: Point::new(9, 0),
            width: 9,
            height: 9,
        };
        assert_eq!(err.to_string(), "point (9, 0) is outside the 9x9 board");

        let err = HistoryError::InvalidIndex { index: -1, len: 3 };
        assert_eq!(err.to_string(), "turn index -1 is outside history of length 3");

        let err = HistoryError::InvalidColor(Color::Offboard);
        assert_eq!(err.to_string(), "color offboard is not valid here");

        let err = HistoryError::InvalidDimensions {
            width: 0,
            height: 9,
        };
        assert_eq!(err.to_string(), "board size 0x9 is not supported");
    }

    #[test]
    fn test_record_fault_messages() {
        let err = HistoryError::InvalidRecord {
            turn: 3,
            fault: RecordFault::Mismatch {
                key: Key(4),
                found: Color::Empty,
                removed: Color::White,
            },
        };
        assert_eq!(
            err.to_string(),
            "invalid history record at turn 3: Key(4) holds empty but the diff removes white"
        );
        assert!(std::error::Error::source(&err).is_some());

        assert_eq!(
            RecordFault::OutOfOrder(Key(2)).to_string(),
            "Key(2) is duplicated or out of order"
        );
    }
}
