//! Rules trait for rulesets sitting on top of the history engine.
//!
//! A ruleset decides whether a move is legal and records its effect through
//! the engine's staging API. The engine itself knows nothing about
//! captures, ko, or scoring.

use serde::{Deserialize, Serialize};

use crate::board::{Color, Point};
use crate::history::{HistoryEngine, Result};

/// Status code returned by rule checks. `RuleCode::OK` means legal.
///
/// The engine doesn't interpret codes beyond `OK`; rulesets assign meaning
/// and describe them via [`Rules::error_text`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RuleCode(pub u16);

impl RuleCode {
    /// The move is legal.
    pub const OK: RuleCode = RuleCode(0);

    /// Create a new rule code.
    #[must_use]
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    /// Get the raw code value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn is_ok(self) -> bool {
        self.0 == 0
    }
}

impl std::fmt::Display for RuleCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Rule({})", self.0)
    }
}

/// Points per color.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub black: u32,
    pub white: u32,
}

impl Score {
    /// Points for `color`. Non-stone colors score nothing.
    #[must_use]
    pub fn of(&self, color: Color) -> u32 {
        match color {
            Color::Black => self.black,
            Color::White => self.white,
            _ => 0,
        }
    }

    /// Color with more points, `None` on a tie.
    #[must_use]
    pub fn winner(&self) -> Option<Color> {
        match self.black.cmp(&self.white) {
            std::cmp::Ordering::Greater => Some(Color::Black),
            std::cmp::Ordering::Less => Some(Color::White),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Rules trait.
///
/// ## Implementation Notes
///
/// - `validate`: must not mutate anything
/// - `enforce`: records the move's full effect (placement, removals) via
///   `put`/`take`, then commits it with `close`
/// - `error_text`: human-readable description of a code from `validate`
pub trait Rules {
    /// Check whether `color` may play at `point`.
    fn validate(&self, history: &HistoryEngine, point: Point, color: Color) -> RuleCode;

    /// Record the move in `history`.
    fn enforce(
        &mut self,
        history: &mut HistoryEngine,
        point: Point,
        color: Color,
    ) -> Result<RuleCode>;

    /// Current score.
    fn score(&self, history: &HistoryEngine) -> Score;

    /// Describe a code returned by `validate`.
    fn error_text(&self, code: RuleCode) -> &'static str;

    /// Validate, and enforce only if legal.
    ///
    /// Returns the validation code when the move is rejected.
    fn validate_and_enforce(
        &mut self,
        history: &mut HistoryEngine,
        point: Point,
        color: Color,
    ) -> Result<RuleCode> {
        let code = self.validate(history, point, color);
        if !code.is_ok() {
            return Ok(code);
        }
        self.enforce(history, point, color)
    }
}
