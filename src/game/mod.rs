//! Game orchestrator.
//!
//! A [`Game`] owns a history engine, a ruleset, and a timer. It forwards
//! player actions to the rules, keeps the timer's side to move in step with
//! committed turns, and records how the game ended. It touches the engine
//! only through staging, commit, and state queries.
//!
//! ```
//! use std::time::Duration;
//! use board_history::board::{Color, Point};
//! use board_history::game::Game;
//! use board_history::history::HistoryConfig;
//! use board_history::rules::OpenRules;
//! use board_history::timer::AbsoluteTimer;
//!
//! let mut game = Game::new(
//!     HistoryConfig::square(9),
//!     OpenRules::new(),
//!     AbsoluteTimer::new(Duration::from_secs(600)),
//! )
//! .unwrap();
//!
//! game.play_move(Point::new(4, 4), Color::Black).unwrap();
//! game.pass_move(Color::White).unwrap();
//!
//! assert_eq!(game.history().len(), 3);
//! assert_eq!(game.frame(1).unwrap().get(4, 4), Color::Black);
//! ```

mod error;

pub use error::GameError;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::board::{Color, Point};
use crate::error::HistoryError;
use crate::history::{FrameView, HistoryConfig, HistoryEngine};
use crate::rules::{RuleCode, Rules, Score};
use crate::timer::Timer;

/// How a finished game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// The given color resigned.
    Resignation(Color),
    /// The given color ran out of time.
    Timeout(Color),
}

impl GameOutcome {
    /// The winning color.
    #[must_use]
    pub fn winner(&self) -> Color {
        match self {
            GameOutcome::Resignation(loser) | GameOutcome::Timeout(loser) => loser.opposite(),
        }
    }
}

/// A game in progress.
#[derive(Debug)]
pub struct Game<R, T> {
    history: HistoryEngine,
    rules: R,
    timer: T,
    outcome: Option<GameOutcome>,
}

impl<R: Rules, T: Timer> Game<R, T> {
    /// Start a game on an empty board.
    pub fn new(config: HistoryConfig, rules: R, timer: T) -> Result<Self, GameError> {
        Ok(Self {
            history: HistoryEngine::new(config)?,
            rules,
            timer,
            outcome: None,
        })
    }

    /// Play a stone for `color`.
    ///
    /// Rejected moves leave the history, timer, and turn unchanged.
    pub fn play_move(&mut self, point: Point, color: Color) -> Result<RuleCode, GameError> {
        self.check_turn(color)?;

        let code = self.rules.validate(&self.history, point, color);
        if !code.is_ok() {
            return Err(GameError::Illegal {
                code,
                reason: self.rules.error_text(code),
            });
        }
        let code = self.rules.enforce(&mut self.history, point, color)?;

        debug!("{} played {} (turn {})", color, point, self.history.turns());
        self.timer.next();
        Ok(code)
    }

    /// Pass: commit a turn with no changes.
    pub fn pass_move(&mut self, color: Color) -> Result<(), GameError> {
        self.check_turn(color)?;
        self.history.close();
        debug!("{} passed (turn {})", color, self.history.turns());
        self.timer.next();
        Ok(())
    }

    /// `color` resigns. Either side may resign at any time.
    pub fn resign(&mut self, color: Color) -> Result<(), GameError> {
        self.check_running()?;
        if !color.is_stone() {
            return Err(HistoryError::InvalidColor(color).into());
        }
        self.timer.pause();
        self.outcome = Some(GameOutcome::Resignation(color));
        debug!("{} resigned", color);
        Ok(())
    }

    /// Advance the clock one period, ending the game on timeout.
    ///
    /// Does nothing while the clock is paused.
    pub fn tick(&mut self) {
        if self.outcome.is_some() || !self.timer.is_running() {
            return;
        }
        self.timer.tick();
        if let Some(loser) = self.timer.timed_out() {
            self.timer.pause();
            self.outcome = Some(GameOutcome::Timeout(loser));
            debug!("{} lost on time", loser);
        }
    }

    /// Start or resume the clock.
    pub fn start_clock(&mut self) {
        if self.outcome.is_none() {
            self.timer.start();
        }
    }

    /// Pause the clock.
    pub fn pause_clock(&mut self) {
        self.timer.pause();
    }

    fn check_running(&self) -> Result<(), GameError> {
        match self.outcome {
            Some(outcome) => Err(GameError::Finished(outcome)),
            None => Ok(()),
        }
    }

    fn check_turn(&self, color: Color) -> Result<(), GameError> {
        self.check_running()?;
        let expected = self.timer.turn();
        if color != expected {
            return Err(GameError::OutOfTurn { expected, got: color });
        }
        Ok(())
    }

    // === Queries ===

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Side to move.
    #[must_use]
    pub fn turn(&self) -> Color {
        self.timer.turn()
    }

    #[must_use]
    pub fn score(&self) -> Score {
        self.rules.score(&self.history)
    }

    #[must_use]
    pub fn history(&self) -> &HistoryEngine {
        &self.history
    }

    /// Lazy view of the board after `index` turns.
    pub fn frame(&self, index: usize) -> Result<FrameView<'_>, GameError> {
        Ok(self.history.frame(index)?)
    }

    #[must_use]
    pub fn rules(&self) -> &R {
        &self.rules
    }

    #[must_use]
    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::OpenRules;
    use crate::timer::AbsoluteTimer;
    use std::time::Duration;

    fn game() -> Game<OpenRules, AbsoluteTimer> {
        Game::new(
            HistoryConfig::square(5),
            OpenRules::new(),
            AbsoluteTimer::new(Duration::from_secs(3)),
        )
        .unwrap()
    }

    #[test]
    fn test_alternating_moves() {
        let mut game = game();
        game.play_move(Point::new(0, 0), Color::Black).unwrap();
        game.play_move(Point::new(1, 0), Color::White).unwrap();

        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.history().len(), 3);
        assert_eq!(game.score(), Score { black: 1, white: 1 });
    }

    #[test]
    fn test_out_of_turn() {
        let mut game = game();
        assert_eq!(
            game.play_move(Point::new(0, 0), Color::White),
            Err(GameError::OutOfTurn { expected: Color::Black, got: Color::White })
        );
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_illegal_move_keeps_turn() {
        let mut game = game();
        game.play_move(Point::new(2, 2), Color::Black).unwrap();

        let err = game.play_move(Point::new(2, 2), Color::White).unwrap_err();
        assert_eq!(
            err,
            GameError::Illegal {
                code: OpenRules::OCCUPIED,
                reason: "intersection is already occupied",
            }
        );
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_pass_commits_empty_turn() {
        let mut game = game();
        game.pass_move(Color::Black).unwrap();

        assert_eq!(game.history().len(), 2);
        assert!(game.history().diffs().get(0).unwrap().is_empty());
        assert_eq!(game.turn(), Color::White);
    }

    #[test]
    fn test_resign_finishes_game() {
        let mut game = game();
        game.resign(Color::White).unwrap();

        let outcome = game.outcome().unwrap();
        assert_eq!(outcome, GameOutcome::Resignation(Color::White));
        assert_eq!(outcome.winner(), Color::Black);
        assert_eq!(
            game.play_move(Point::new(0, 0), Color::Black),
            Err(GameError::Finished(outcome))
        );
    }

    #[test]
    fn test_timeout_finishes_game() {
        let mut game = game();
        game.start_clock();
        for _ in 0..3 {
            game.tick();
        }
        assert_eq!(game.outcome(), Some(GameOutcome::Timeout(Color::Black)));
        assert!(game.pass_move(Color::Black).is_err());
    }

    #[test]
    fn test_zero_main_time_needs_running_clock() {
        let mut game = Game::new(
            HistoryConfig::square(5),
            OpenRules::new(),
            AbsoluteTimer::new(Duration::ZERO),
        )
        .unwrap();

        game.tick();
        game.tick();
        assert_eq!(game.outcome(), None);
        game.pass_move(Color::Black).unwrap();

        game.start_clock();
        game.tick();
        assert_eq!(game.outcome(), Some(GameOutcome::Timeout(Color::White)));
    }
}
