//! Placement-only ruleset.
//!
//! Any empty on-board intersection is a legal move for either stone color.
//! Stones are never removed and the score is the number of stones each color
//! has on the board. Useful for exercising the history engine and as a base
//! for games without captures (gomoku-style placement games).

use crate::board::{Color, Point};
use crate::history::{HistoryEngine, Result};

use super::engine::{RuleCode, Rules, Score};

/// Placement-only rules.
#[derive(Clone, Copy, Debug, Default)]
pub struct OpenRules;

impl OpenRules {
    /// The point is outside the board.
    pub const OFF_BOARD: RuleCode = RuleCode::new(1);
    /// The color is not a stone color.
    pub const NOT_A_STONE: RuleCode = RuleCode::new(2);
    /// The intersection is already occupied.
    pub const OCCUPIED: RuleCode = RuleCode::new(3);

    pub fn new() -> Self {
        Self
    }
}

impl Rules for OpenRules {
    fn validate(&self, history: &HistoryEngine, point: Point, color: Color) -> RuleCode {
        if !color.is_stone() {
            return Self::NOT_A_STONE;
        }
        match history.working().get(point) {
            Color::Offboard => Self::OFF_BOARD,
            Color::Empty => RuleCode::OK,
            _ => Self::OCCUPIED,
        }
    }

    fn enforce(
        &mut self,
        history: &mut HistoryEngine,
        point: Point,
        color: Color,
    ) -> Result<RuleCode> {
        history.put(&[(point, color)])?;
        history.close();
        Ok(RuleCode::OK)
    }

    fn score(&self, history: &HistoryEngine) -> Score {
        let latest = history.latest();
        Score {
            black: latest.count(Color::Black) as u32,
            white: latest.count(Color::White) as u32,
        }
    }

    fn error_text(&self, code: RuleCode) -> &'static str {
        match code {
            RuleCode::OK => "legal move",
            Self::OFF_BOARD => "point is outside the board",
            Self::NOT_A_STONE => "only black or white stones can be played",
            Self::OCCUPIED => "intersection is already occupied",
            _ => "unknown rule code",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HistoryConfig;

    fn history() -> HistoryEngine {
        HistoryEngine::new(HistoryConfig::square(5)).unwrap()
    }

    #[test]
    fn test_validate() {
        let mut history = history();
        let rules = OpenRules::new();
        history.put(&[(Point::new(1, 1), Color::Black)]).unwrap();
        history.close();

        assert_eq!(rules.validate(&history, Point::new(0, 0), Color::White), RuleCode::OK);
        assert_eq!(rules.validate(&history, Point::new(1, 1), Color::White), OpenRules::OCCUPIED);
        assert_eq!(rules.validate(&history, Point::new(5, 0), Color::White), OpenRules::OFF_BOARD);
        assert_eq!(
            rules.validate(&history, Point::new(0, 0), Color::Empty),
            OpenRules::NOT_A_STONE
        );
    }

    #[test]
    fn test_enforce_commits_turn() {
        let mut history = history();
        let mut rules = OpenRules::new();

        let code = rules.enforce(&mut history, Point::new(2, 2), Color::Black).unwrap();
        assert!(code.is_ok());
        assert_eq!(history.len(), 2);
        assert_eq!(history.get_state(1).unwrap().get(Point::new(2, 2)), Color::Black);
    }

    #[test]
    fn test_validate_and_enforce_rejects_without_mutation() {
        let mut history = history();
        let mut rules = OpenRules::new();
        rules.enforce(&mut history, Point::new(2, 2), Color::Black).unwrap();

        let code = rules
            .validate_and_enforce(&mut history, Point::new(2, 2), Color::White)
            .unwrap();
        assert_eq!(code, OpenRules::OCCUPIED);
        assert_eq!(history.len(), 2);
        assert_eq!(rules.error_text(code), "intersection is already occupied");
    }

    #[test]
    fn test_score_counts_stones() {
        let mut history = history();
        let mut rules = OpenRules::new();
        rules.enforce(&mut history, Point::new(0, 0), Color::Black).unwrap();
        rules.enforce(&mut history, Point::new(1, 0), Color::White).unwrap();
        rules.enforce(&mut history, Point::new(2, 0), Color::Black).unwrap();

        let score = rules.score(&history);
        assert_eq!(score, Score { black: 2, white: 1 });
        assert_eq!(score.winner(), Some(Color::Black));
    }
}
