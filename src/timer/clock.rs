//! Timer trait.

use std::time::Duration;

use crate::board::Color;

/// Turn timer.
///
/// The orchestrator drives a timer by calling `tick` once per period and
/// `next` after each committed turn. `on_turn_change` is the hook a timer
/// policy uses to react when the side to move changes.
pub trait Timer {
    /// Start or resume the clock.
    fn start(&mut self);

    /// Stop the clock without resetting it.
    fn pause(&mut self);

    /// Advance the clock by one period.
    fn tick(&mut self);

    /// Time remaining for the side to move.
    fn time_left(&self) -> Duration;

    /// Is the clock running?
    fn is_running(&self) -> bool;

    /// The side that ran out of time, if any.
    fn timed_out(&self) -> Option<Color>;

    /// Called after the side to move changes to `color`.
    fn on_turn_change(&mut self, color: Color);

    /// Side to move.
    fn turn(&self) -> Color;

    /// Set the side to move without notifying anyone.
    fn set_turn_silently(&mut self, color: Color);

    /// Set the side to move, calling `on_turn_change` if it changed.
    fn set_turn(&mut self, color: Color) {
        if color == self.turn() {
            return;
        }
        self.set_turn_silently(color);
        self.on_turn_change(color);
    }

    /// Hand the move to the other side.
    fn next(&mut self) {
        let next = self.turn().opposite();
        self.set_turn(next);
    }
}
