//! Game orchestration errors.

use thiserror::Error;

use super::GameOutcome;
use crate::board::Color;
use crate::error::HistoryError;
use crate::rules::RuleCode;

/// Errors raised by [`Game`](super::Game).
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum GameError {
    /// The ruleset rejected the move.
    #[error("illegal move ({code}): {reason}")]
    Illegal { code: RuleCode, reason: &'static str },

    /// The wrong side tried to move.
    #[error("{got} moved out of turn; {expected} to play")]
    OutOfTurn { expected: Color, got: Color },

    /// The game is over.
    #[error("game is over: {0:?}")]
    Finished(GameOutcome),

    #[error(transparent)]
    History(#[from] HistoryError),
}
